pub mod foir;
