pub mod contact_repository;

pub use contact_repository::ContactRepository;
