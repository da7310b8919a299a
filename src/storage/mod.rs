pub mod write_calculation_information;
