pub mod input_spec;
pub mod tensor;
