pub mod polynomial;

mod ordered_ops;
