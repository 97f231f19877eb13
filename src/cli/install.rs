use super::{prompt, KindFlags};
use crate::install::{execute, select_all, ExecuteOptions, ExistenceMatrix, ItemEvent, Linker, Mode};
use crate::models::{Artifact, ArtifactKind, Config, InstallSummary, LinkMethod, Target, DEFAULT_TARGET};
use crate::scanner;
use crate::source::{resolve_source, ResolvedSource};
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::env;
use std::path::{Path, PathBuf};

/// Options shared by `install` and `update`
#[derive(Args, Debug, Clone, Default)]
pub struct InstallArgs {
    /// Local path, owner/repo[/branch] or GitHub URL (default: current directory)
    pub source: Option<String>,

    #[command(flatten)]
    pub kinds: KindFlags,

    /// Select every eligible item without prompting
    #[arg(short, long)]
    pub all: bool,

    /// Target key such as .claude or .cursor, or a custom directory
    #[arg(short, long)]
    pub target: Option<String>,

    /// Placement method: symlink or copy
    #[arg(short, long)]
    pub method: Option<String>,

    /// Overwrite entries that already exist (implied by update)
    #[arg(short, long)]
    pub force: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl InstallArgs {
    fn non_interactive(&self) -> bool {
        self.all || self.yes
    }
}

/// Items of one kind chosen for a run, with the matrix they were chosen against
struct KindPlan {
    kind: ArtifactKind,
    target_dirs: Vec<PathBuf>,
    matrix: ExistenceMatrix,
    selected: Vec<Artifact>,
}

/// Run `install` or `update`
pub async fn run(mode: Mode, args: InstallArgs, config: &Config) -> Result<()> {
    let method = match &args.method {
        Some(raw) => raw.parse::<LinkMethod>()?,
        None => config.link_method_or_default(),
    };

    let source = resolve_source(args.source.as_deref()).await?;
    print_source(&source);

    let Some(kinds) = resolve_kinds(&args)? else {
        return cancelled();
    };
    if kinds.is_empty() {
        println!("{}", "No artifact types selected. Nothing to do.".yellow());
        return Ok(());
    }

    let Some(targets) = resolve_targets(&args, config)? else {
        return cancelled();
    };
    if targets.is_empty() {
        println!("{}", "No targets selected. Nothing to do.".yellow());
        return Ok(());
    }

    let project_root = env::current_dir()?;
    println!(
        "   Targets: {}",
        targets
            .iter()
            .map(|t| t.key.as_str())
            .collect::<Vec<_>>()
            .join(", ")
            .cyan()
    );
    println!();

    // Every matrix is built and every selection made before anything is written
    let mut plans = Vec::new();
    for kind in kinds {
        let items = scanner::scan(kind, source.path())?;
        if items.is_empty() {
            println!("{}", format!("No {} found in source", kind).bright_black());
            continue;
        }

        let target_dirs: Vec<PathBuf> = targets
            .iter()
            .map(|t| t.dir_for(kind, &project_root))
            .collect();
        let matrix = ExistenceMatrix::build(&items, &target_dirs);

        let selected = if args.all {
            select_all(&items, mode, &matrix)
        } else {
            match prompt::select_items(kind, &items, mode, &matrix)? {
                Some(selected) => selected,
                None => return cancelled(),
            }
        };

        if !selected.is_empty() {
            plans.push(KindPlan {
                kind,
                target_dirs,
                matrix,
                selected,
            });
        }
    }

    let item_count: usize = plans.iter().map(|p| p.selected.len()).sum();
    if item_count == 0 {
        println!("{}", format!("Nothing to {}.", mode).yellow());
        return Ok(());
    }

    if !args.non_interactive() {
        let question = format!(
            "{} {} item(s) into {} target(s) using {}?",
            capitalize(mode.verb()),
            item_count,
            targets.len(),
            method
        );
        match prompt::confirm(&question)? {
            Some(true) => {}
            _ => return cancelled(),
        }
    }

    let options = ExecuteOptions {
        mode,
        method,
        force: args.force,
    };
    let linker = Linker::new();
    let mut totals: Vec<InstallSummary> = vec![InstallSummary::default(); targets.len()];

    for plan in &plans {
        println!("{}", format!("📦 {}", plan.kind.title()).cyan().bold());
        let report = execute(&plan.selected, &plan.target_dirs, &plan.matrix, options, &linker);
        print_events(&report.events, &project_root);

        for (total, (_, summary)) in totals.iter_mut().zip(&report.summaries) {
            total.installed += summary.installed;
            total.skipped += summary.skipped;
            total.failed += summary.failed;
        }
    }

    print_summary(mode, &targets, &totals);
    Ok(())
}

fn resolve_kinds(args: &InstallArgs) -> Result<Option<Vec<ArtifactKind>>> {
    let kinds = args.kinds.selected();
    if !kinds.is_empty() || args.non_interactive() {
        return Ok(Some(if kinds.is_empty() {
            ArtifactKind::ALL.to_vec()
        } else {
            kinds
        }));
    }
    prompt::select_kinds()
}

/// `--target`, then the configured default, then a prompt (or `.claude` when not prompting)
fn resolve_targets(args: &InstallArgs, config: &Config) -> Result<Option<Vec<Target>>> {
    if let Some(key) = args.target.as_deref().or(config.default_target.as_deref()) {
        return Ok(Some(vec![Target::from_key(key)]));
    }
    if args.non_interactive() {
        return Ok(Some(vec![Target::from_key(DEFAULT_TARGET)]));
    }
    prompt::select_targets()
}

fn cancelled() -> Result<()> {
    println!("{}", "Cancelled.".yellow());
    Ok(())
}

fn print_source(source: &ResolvedSource) {
    match source {
        ResolvedSource::Local(path) => {
            println!("{} {}", "📁 Source:".cyan(), path.display());
        }
        ResolvedSource::Remote { reference, path } => {
            println!("{} {}", "🌐 Source:".cyan(), reference);
            println!("   {}", path.display().to_string().bright_black());
        }
    }
}

fn print_events(events: &[ItemEvent], project_root: &Path) {
    for event in events {
        match event {
            ItemEvent::Installed {
                target_dir,
                id,
                method,
            } => {
                let verb = match method {
                    LinkMethod::Symlink => "linked",
                    LinkMethod::Copy => "copied",
                };
                println!(
                    "   {} {} {}",
                    "✓".green(),
                    id,
                    format!("({} → {})", verb, relative(target_dir, project_root)).bright_black()
                );
            }
            ItemEvent::Skipped { target_dir, id } => {
                println!(
                    "   {} {} {}",
                    "-".bright_black(),
                    id,
                    format!("(exists in {})", relative(target_dir, project_root)).bright_black()
                );
            }
            ItemEvent::Failed {
                target_dir,
                id,
                reason,
            } => {
                eprintln!(
                    "   {} {} ({}): {}",
                    "✗".red(),
                    id,
                    relative(target_dir, project_root),
                    reason.yellow()
                );
            }
        }
    }
}

fn print_summary(mode: Mode, targets: &[Target], totals: &[InstallSummary]) {
    println!();
    println!("{}", "📊 Summary".cyan().bold());
    for (target, summary) in targets.iter().zip(totals) {
        let mut parts = vec![format!("{} {}", summary.installed, past_tense(mode)).green()];
        if summary.skipped > 0 {
            parts.push(format!("{} skipped", summary.skipped).yellow());
        }
        if summary.failed > 0 {
            parts.push(format!("{} failed", summary.failed).red());
        }
        let parts: Vec<String> = parts.into_iter().map(|p| p.to_string()).collect();
        println!("   {:<16} {}", target.config.name, parts.join(", "));
    }

    if totals.iter().all(|s| s.failed == 0) {
        println!();
        println!("{}", "✅ Done!".green().bold());
    }
}

fn past_tense(mode: Mode) -> &'static str {
    match mode {
        Mode::Install => "installed",
        Mode::Update => "updated",
    }
}

fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_default_to_all_when_not_prompting() {
        let args = InstallArgs {
            all: true,
            ..Default::default()
        };
        assert_eq!(resolve_kinds(&args).unwrap(), Some(ArtifactKind::ALL.to_vec()));
    }

    #[test]
    fn test_explicit_kind_flags_win() {
        let args = InstallArgs {
            kinds: KindFlags {
                rules: true,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(resolve_kinds(&args).unwrap(), Some(vec![ArtifactKind::Rule]));
    }

    #[test]
    fn test_target_resolution_order() {
        let config = Config {
            default_target: Some(".cursor".to_string()),
            link_method: None,
        };

        let explicit = InstallArgs {
            target: Some(".codex".to_string()),
            ..Default::default()
        };
        let targets = resolve_targets(&explicit, &config).unwrap().unwrap();
        assert_eq!(targets[0].key, ".codex");

        let targets = resolve_targets(&InstallArgs::default(), &config)
            .unwrap()
            .unwrap();
        assert_eq!(targets[0].key, ".cursor");

        let unattended = InstallArgs {
            yes: true,
            ..Default::default()
        };
        let targets = resolve_targets(&unattended, &Config::default())
            .unwrap()
            .unwrap();
        assert_eq!(targets[0].key, DEFAULT_TARGET);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("install"), "Install");
        assert_eq!(capitalize(""), "");
    }
}
