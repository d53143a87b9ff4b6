pub mod dyndns;
