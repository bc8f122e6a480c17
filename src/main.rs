use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;

use semtag::config::{self, Overrides};
use semtag::domain::VersionComponent;
use semtag::engine::Versioner;
use semtag::git::{Git2Repository, Repository};
use semtag::{logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "semtag",
    version,
    about = "Determine the next semantic version from git tags"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'C', long, default_value = ".", help = "Repository directory")]
    path: String,

    #[arg(
        short,
        long,
        help = "Component to bump: major, minor, patch, pre-release or none (inferred when omitted)"
    )]
    bump: Option<VersionComponent>,

    #[arg(long, help = "Start a new pre-release sequence")]
    new_pre_release: bool,

    #[arg(long, help = "Promote the latest pre-release to a release")]
    promote: bool,

    #[arg(long, help = "Produce a snapshot version; allowed on a dirty working tree")]
    snapshot: bool,

    #[arg(long, help = "Print the latest matching version and exit")]
    latest: bool,

    #[arg(
        long,
        conflicts_with_all = ["snapshot", "latest"],
        help = "Create a lightweight tag for the determined version at HEAD"
    )]
    tag: bool,

    #[arg(long, help = "Print the result as JSON")]
    json: bool,

    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (repeatable)")]
    verbose: u8,

    #[arg(short, long, conflicts_with = "verbose", help = "Only log errors")]
    quiet: bool,
}

#[derive(Serialize)]
struct LatestOutput<'a> {
    tag: &'a str,
    version: &'a str,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    logging::init(logging::level_for(args.verbose, args.quiet))?;

    let config = config::load_config(args.config.as_deref())?;
    let overrides = Overrides {
        bump: args.bump,
        new_pre_release: args.new_pre_release,
        promote_to_release: args.promote,
        snapshot: args.snapshot,
    };
    let policy = config.to_policy(&overrides)?;

    let mut versioner = Versioner::new(Git2Repository::open(&args.path)?);

    if args.latest {
        let Some(latest) = versioner.latest_version(&policy)? else {
            bail!(
                "No tags match pattern /{}/",
                policy.tag_pattern.as_str()
            );
        };
        if args.json {
            let output = LatestOutput {
                tag: &latest.tag_name,
                version: latest.version.as_str(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", latest.version);
        }
        return Ok(());
    }

    let determination = versioner.determine(&policy)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&determination)?);
    } else {
        if !args.quiet {
            ui::display_determination(&determination);
        }
        println!("{}", determination.version);
    }

    if args.tag {
        if determination.snapshot {
            bail!("Refusing to tag snapshot version {}", determination.version);
        }
        if let (Some(head_tag), None) = (&determination.head_tag, determination.bump) {
            ui::display_status(&format!("HEAD is already tagged '{}'", head_tag));
            return Ok(());
        }

        let tag_name = config.tag_format()?.format(&determination.version);
        versioner.repository().create_tag(&tag_name)?;
        if !args.quiet {
            ui::display_success(&format!("Created tag '{}'", tag_name));
        }
    }

    Ok(())
}
