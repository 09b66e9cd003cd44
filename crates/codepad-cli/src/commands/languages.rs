use codepad_core::language;

pub fn list() {
    println!("{:<12} {:<12} {:<6} RUNS", "NAME", "MODE", "EXT");
    for spec in language::all() {
        let runs = if spec.runs_in_browser() {
            "local"
        } else {
            spec.execution_code
        };
        println!(
            "{:<12} {:<12} {:<6} {}",
            spec.name, spec.mode, spec.extension, runs
        );
    }
}
