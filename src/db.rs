pub mod store;
pub use store::BookingStore;
pub mod booking_repo;
pub use booking_repo::BookingRepository;

#[cfg(test)]
pub mod memory_store;
