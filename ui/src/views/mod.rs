mod comparator;
pub use comparator::Comparator;
