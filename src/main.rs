// Writes the matrix-vector test set (A, V and AV = A x V) for n = 8 into the
// current directory. Edit `SCENARIO` to produce one of the other sets.

use std::process::ExitCode;

use rtlvec::{generate_and_save_data, Scenario};

const N: i64 = 8;
const OUTPUT_PREFIX: &str = "my_data";
const SCENARIO: Scenario = Scenario::VectorMultiplication;

fn main() -> ExitCode {
    println!("--- {SCENARIO:?} ---");

    let report = generate_and_save_data(&SCENARIO.config(N, OUTPUT_PREFIX));

    if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
