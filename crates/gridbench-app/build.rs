//! Emits `VERGEN_GIT_*` variables so the runner banner can show the commit.

use vergen_gitcl::{Emitter, GitclBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let git = GitclBuilder::default().sha(true).dirty(true).build()?;
    Emitter::default().add_instructions(&git)?.emit()?;
    Ok(())
}
