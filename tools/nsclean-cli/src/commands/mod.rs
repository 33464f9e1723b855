pub mod batch;
pub mod denoise;
pub mod inspect;
