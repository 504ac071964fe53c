mod opaque_errors;
mod timing_sidechannel;
