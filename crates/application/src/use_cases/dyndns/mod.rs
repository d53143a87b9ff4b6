pub mod update_records;

pub use update_records::{DynDnsUpdateRequest, DynDnsUpdateUseCase};
