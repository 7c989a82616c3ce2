//! End-to-end loader pipeline tests.

mod cancellation;
mod determinism_json;
mod file_backed;
mod full_image;
mod registers;
mod truncation;
mod vectors;
