pub mod prayer;
