pub mod therapy;

pub use therapy::TherapyService;
