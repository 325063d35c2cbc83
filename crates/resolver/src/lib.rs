pub mod resolver;

pub use resolver::LayoutResolver;
