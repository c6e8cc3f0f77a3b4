pub mod burrito;
