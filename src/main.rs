use std::time::Duration;

use twophase::Solver;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let facelets = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: twophase <54-character facelet string>"))?;

    twophase::init_tables();
    let solver = Solver::from_facelets(&facelets)?;
    match solver.search(25, Duration::from_secs(10))? {
        Some(solution) => println!("{}", solution),
        None => println!("no solution within 25 moves"),
    }

    Ok(())
}
