pub mod faults;
pub mod forwarding;
pub mod fp;
pub mod properties;
pub mod rob_full;
pub mod scenarios;
pub mod squash;
