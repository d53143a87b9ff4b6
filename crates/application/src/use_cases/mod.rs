pub mod dyndns;

pub use dyndns::{DynDnsUpdateRequest, DynDnsUpdateUseCase};
