pub mod lenders;
