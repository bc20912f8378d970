use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use ralph_core::config::{self, Config};
use ralph_core::{paths, prompt};

use super::{ask, Ctx};
use crate::ui::{format, Theme};

/// `ralph setup`: choose RALPH_HOME, write the config, link the skills.
pub fn run(ctx: &Ctx, path: Option<PathBuf>, skills: Option<PathBuf>) -> anyhow::Result<()> {
    let t = &ctx.theme;
    println!("{}", format::header(t, "Ralph Setup"));
    println!();

    let existing = Config::load().ok();
    let chosen = match path {
        Some(p) => Some(p.to_string_lossy().into_owned()),
        None => {
            if let Some(cfg) = &existing {
                println!(
                    "{}",
                    format::key_value(t, "Current", &cfg.ralph_home.display().to_string())
                );
                ask("Enter new path (or press Enter to keep current): ")?
            } else {
                println!("{}", t.muted("RALPH_HOME holds the prompt template and project data."));
                ask("Enter path for RALPH_HOME (or press Enter for current directory): ")?
            }
        }
    };
    let chosen = chosen.filter(|p| !p.is_empty());

    let home = match (chosen, &existing) {
        (Some(p), _) => resolve(&p)?,
        (None, Some(cfg)) => {
            println!("{}", t.muted("Keeping existing configuration."));
            prepare_home(t, &cfg.ralph_home)?;
            install_skills(t, skills.as_deref());
            return finish(t);
        }
        (None, None) => std::env::current_dir().context("cannot read current directory")?,
    };

    prepare_home(t, &home)?;
    Config::new(&home)
        .save()
        .context("failed to write config")?;
    println!();
    println!("{}", format::success(t, "Configuration saved"));
    println!("{}", format::key_value(t, "RALPH_HOME", &home.display().to_string()));

    install_skills(t, skills.as_deref());
    finish(t)
}

fn finish(t: &Theme) -> anyhow::Result<()> {
    println!();
    println!("{}", format::success(t, "Setup complete!"));
    println!("{}", format::next_step(t, "ralph init", "in a project directory"));
    Ok(())
}

/// Expand `~` and make the path absolute against the current directory.
fn resolve(raw: &str) -> anyhow::Result<PathBuf> {
    let p = config::expand_tilde(raw)?;
    if p.is_absolute() {
        Ok(p)
    } else {
        Ok(std::env::current_dir()
            .context("cannot read current directory")?
            .join(p))
    }
}

/// Create `<home>/projects` and seed `prompt.md`. Returns whether the
/// template was written.
fn prepare_home(t: &Theme, home: &Path) -> anyhow::Result<bool> {
    let projects = paths::projects_dir(home);
    fs::create_dir_all(&projects)
        .with_context(|| format!("failed to create {}", projects.display()))?;
    let seeded = prompt::seed_template(home)?;
    if seeded {
        println!(
            "{}",
            format::success(
                t,
                &format!("Wrote default prompt template to {}", paths::prompt_path(home).display())
            )
        );
    }
    Ok(seeded)
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum LinkOutcome {
    Linked,
    AlreadyLinked,
    /// A real directory (not ours) sits at the destination.
    Occupied,
}

/// Skill installation never fails setup; problems are reported as warnings.
fn install_skills(t: &Theme, explicit: Option<&Path>) {
    println!();
    if let Err(e) = try_install_skills(t, explicit) {
        println!("{}", format::warning(t, &format!("Skills not installed: {e:#}")));
    }
}

fn try_install_skills(t: &Theme, explicit: Option<&Path>) -> anyhow::Result<()> {
    let claude_dir = config::claude_config_dir()?;
    if !claude_dir.is_dir() {
        println!(
            "{}",
            t.muted(&format!(
                "Claude config directory {} not found, skipping skills.",
                claude_dir.display()
            ))
        );
        return Ok(());
    }

    let source = match explicit {
        Some(dir) if is_skills_dir(dir) => dir.to_path_buf(),
        Some(dir) => anyhow::bail!("{} contains no */SKILL.md", dir.display()),
        None => match find_skills_source() {
            Some(dir) => dir,
            None => {
                println!(
                    "{}",
                    t.muted("Bundled skills not found. Pass --skills <dir> to link them.")
                );
                return Ok(());
            }
        },
    };
    let source = fs::canonicalize(&source).unwrap_or(source);

    let target = config::claude_config_dir()?.join("skills");
    fs::create_dir_all(&target)
        .with_context(|| format!("failed to create {}", target.display()))?;
    let target = config::claude_skills_dir()?;

    println!("{}", t.title("Installing skills"));
    let mut installed = 0;
    for skill in skill_dirs(&source)? {
        let Some(name) = skill.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        match link_skill(&skill, &target.join(&name)) {
            Ok(LinkOutcome::Linked) => {
                installed += 1;
                println!("  {}", format::success(t, &name));
            }
            Ok(LinkOutcome::AlreadyLinked) => {
                println!("  {} {name} already installed", t.muted("="));
            }
            Ok(LinkOutcome::Occupied) => {
                println!("  {} {name} skipped: directory exists", t.warning("!"));
            }
            Err(e) => {
                println!("  {}", format::error(t, &format!("{name}: {e}")));
            }
        }
    }
    println!(
        "{}",
        t.muted(&format!("Installed {installed} skill(s) into {}", target.display()))
    );
    Ok(())
}

/// Look next to the working directory and the executable.
fn find_skills_source() -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join("skills"));
    }
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        candidates.push(exe_dir.join("skills"));
        candidates.push(exe_dir.join("..").join("skills"));
    }
    candidates.into_iter().find(|c| is_skills_dir(c))
}

fn is_skills_dir(dir: &Path) -> bool {
    skill_dirs(dir).map(|d| !d.is_empty()).unwrap_or(false)
}

/// Subdirectories of `dir` holding a `SKILL.md`, sorted by name.
fn skill_dirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.join("SKILL.md").is_file())
        .collect();
    out.sort();
    Ok(out)
}

fn link_skill(src: &Path, dst: &Path) -> io::Result<LinkOutcome> {
    match fs::symlink_metadata(dst) {
        Ok(meta) if meta.file_type().is_symlink() => {
            if fs::read_link(dst)? == src {
                return Ok(LinkOutcome::AlreadyLinked);
            }
            remove_link(dst)?;
        }
        Ok(_) => return Ok(LinkOutcome::Occupied),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    symlink_dir(src, dst)?;
    tracing::debug!(src = %src.display(), dst = %dst.display(), "skill linked");
    Ok(LinkOutcome::Linked)
}

#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

#[cfg(unix)]
fn remove_link(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

#[cfg(windows)]
fn remove_link(path: &Path) -> io::Result<()> {
    fs::remove_dir(path)
}
