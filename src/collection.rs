mod bounded_vec;

pub use bounded_vec::BoundedVec;
