pub mod soll_ist;
