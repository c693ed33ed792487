extern crate bignum;
extern crate dsa;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;

pub mod demonstration;
pub mod errors;
pub mod input;
pub mod report;
