use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use memebot::{
    ApplyOutcome, Audience, CaptionBand, EditorController, FontChoice, GeminiClient, Idea,
    IdeaOrchestrator, IdeaRequest, IdeaSection, MemeCompositor, MemeError, MemebotConfig,
    Platform, StylePatch, TEMPLATES, TextColor, Tone,
};

#[derive(Parser, Debug)]
#[command(name = "memebot", version, about = "Nepali meme ideas and caption rendering")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render captions onto an image (or the placeholder) without any remote call.
    Compose(ComposeArgs),
    /// Ask the idea model for three meme / reels / caption ideas.
    Ideas(IdeasArgs),
    /// Apply a built-in template with a generated background and export it.
    Template(TemplateArgs),
    /// List the built-in templates.
    Templates,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Background image (PNG, JPEG, WebP, ...). The placeholder is drawn when omitted.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Top caption.
    #[arg(long, default_value = "")]
    top: String,

    /// Bottom caption.
    #[arg(long, default_value = "")]
    bottom: String,

    /// Top font scale in tenths of the base size (5-20).
    #[arg(long)]
    top_scale: Option<u8>,

    /// Bottom font scale in tenths of the base size (5-20).
    #[arg(long)]
    bottom_scale: Option<u8>,

    /// Caption fill color: white, yellow or black.
    #[arg(long)]
    color: Option<TextColor>,

    /// Top caption offset from the top edge, percent of height (0-50).
    #[arg(long)]
    top_offset: Option<u8>,

    /// Bottom caption offset from the bottom edge, percent of height (0-50).
    #[arg(long)]
    bottom_offset: Option<u8>,

    /// Write the current preview to this PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Export into this directory as `memebot-nepal-<millis>.png` (requires an image).
    #[arg(long)]
    export_dir: Option<PathBuf>,

    #[command(flatten)]
    font: FontArgs,
}

#[derive(Parser, Debug)]
struct IdeasArgs {
    /// What the memes should be about.
    #[arg(long)]
    topic: String,

    /// Satirical, Motivational, Sarcastic, Relatable, Political or Cringe.
    #[arg(long, default_value_t = Tone::default())]
    tone: Tone,

    /// Facebook, TikTok, Instagram or Twitter.
    #[arg(long, default_value_t = Platform::default())]
    platform: Platform,

    /// Youth/GenZ, Professionals, Students, General Public or Nepali Diaspora.
    #[arg(long, default_value_t = Audience::default())]
    audience: Audience,

    /// Print the raw ideas as JSON.
    #[arg(long)]
    json: bool,

    /// Generate the image for idea N (1-3) and export the finished meme.
    #[arg(long, requires = "out_dir")]
    apply: Option<usize>,

    /// Export directory used with `--apply`.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    remote: RemoteArgs,

    #[command(flatten)]
    font: FontArgs,
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// Template id (see `memebot templates`).
    id: String,

    /// Export directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Seed for the caption pick; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    remote: RemoteArgs,

    #[command(flatten)]
    font: FontArgs,
}

#[derive(Parser, Debug)]
struct FontArgs {
    /// Caption font file overriding MEMEBOT_FONT and system discovery.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RemoteArgs {
    /// Per-request timeout in seconds (overrides MEMEBOT_REQUEST_TIMEOUT_SECS).
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        match err.downcast_ref::<MemeError>() {
            Some(meme_err) => {
                tracing::debug!(error = %meme_err, "command failed");
                eprintln!("error: {}", meme_err.user_message());
            }
            None => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = MemebotConfig::from_env()?;
    match cli.cmd {
        Command::Compose(args) => cmd_compose(&mut config, args),
        Command::Ideas(args) => cmd_ideas(&mut config, args).await,
        Command::Template(args) => cmd_template(&mut config, args).await,
        Command::Templates => {
            cmd_templates();
            Ok(())
        }
    }
}

fn apply_overrides(config: &mut MemebotConfig, font: &FontArgs, remote: Option<&RemoteArgs>) {
    if let Some(path) = &font.font {
        config.font = Some(path.clone());
    }
    if let Some(secs) = remote.and_then(|r| r.timeout_secs).filter(|&s| s > 0) {
        config.request_timeout = Duration::from_secs(secs);
    }
}

fn make_editor(config: &MemebotConfig) -> anyhow::Result<EditorController> {
    let font: FontChoice = config.font_choice();
    Ok(EditorController::new(MemeCompositor::new(font))?)
}

fn cmd_compose(config: &mut MemebotConfig, args: ComposeArgs) -> anyhow::Result<()> {
    apply_overrides(config, &args.font, None);
    if args.out.is_none() && args.export_dir.is_none() {
        anyhow::bail!("nothing to write: pass --out and/or --export-dir");
    }

    let mut editor = make_editor(config)?;
    if let Some(path) = &args.image {
        let bitmap = memebot::load_image_file(path)?;
        editor.set_image(bitmap)?;
    }
    editor.set_style(&StylePatch {
        top_font_scale: args.top_scale,
        bottom_font_scale: args.bottom_scale,
        text_color: args.color,
        top_offset_percent: args.top_offset,
        bottom_offset_percent: args.bottom_offset,
    })?;
    editor.set_caption(CaptionBand::Top, args.top)?;
    editor.set_caption(CaptionBand::Bottom, args.bottom)?;

    if let Some(out) = &args.out {
        let preview = editor
            .rendered()
            .context("no preview was rendered")?;
        preview.save_png(out)?;
        eprintln!("wrote {}", out.display());
    }
    if let Some(dir) = &args.export_dir {
        let path = editor.export_to_dir(dir)?;
        eprintln!("exported {}", path.display());
    }
    Ok(())
}

async fn cmd_ideas(config: &mut MemebotConfig, args: IdeasArgs) -> anyhow::Result<()> {
    apply_overrides(config, &args.font, Some(&args.remote));
    let request = IdeaRequest {
        topic: args.topic,
        tone: args.tone,
        platform: args.platform,
        audience: args.audience,
    };
    // Validate before the credential check so a blank topic never needs a key.
    request.validate()?;

    let client = GeminiClient::new(config)?;
    let mut orchestrator = IdeaOrchestrator::new(&client);
    let ideas = orchestrator.generate_ideas(&request).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ideas)?);
    } else {
        for (i, idea) in ideas.iter().enumerate() {
            print_idea(i + 1, idea);
        }
    }

    if let (Some(n), Some(dir)) = (args.apply, args.out_dir.as_deref()) {
        let idea = n
            .checked_sub(1)
            .and_then(|i| ideas.get(i))
            .with_context(|| format!("--apply expects 1..={}, got {n}", ideas.len()))?;
        let mut editor = make_editor(config)?;
        match editor
            .apply_generated_idea(&client, &idea.meme_template)
            .await?
        {
            ApplyOutcome::Applied => export(&editor, dir)?,
            ApplyOutcome::TextOnly(warning) => {
                eprintln!("warning: {warning}");
                eprintln!("captions are set but there is no image to export");
            }
            ApplyOutcome::Stale => {}
        }
    }
    Ok(())
}

async fn cmd_template(config: &mut MemebotConfig, args: TemplateArgs) -> anyhow::Result<()> {
    apply_overrides(config, &args.font, Some(&args.remote));
    memebot::find_template(&args.id)?;

    let client = GeminiClient::new(config)?;
    let mut editor = make_editor(config)?;
    if let Some(seed) = args.seed {
        use rand::SeedableRng as _;
        editor = editor.with_rng(rand::rngs::StdRng::seed_from_u64(seed));
    }

    if editor.apply_template(&client, &args.id).await? == ApplyOutcome::Applied {
        let captions = editor.captions();
        eprintln!("captions: {} / {}", captions.top, captions.bottom);
        export(&editor, &args.out_dir)?;
    }
    Ok(())
}

fn cmd_templates() {
    for t in TEMPLATES {
        println!("{:<14} {} {}", t.id, t.icon, t.display_name);
    }
}

fn export(editor: &EditorController, dir: &Path) -> anyhow::Result<()> {
    let path = editor
        .export_to_dir(dir)
        .with_context(|| format!("export into '{}'", dir.display()))?;
    println!("{}", path.display());
    Ok(())
}

fn print_idea(n: usize, idea: &Idea) {
    println!("== {n}. {} ==", idea.title);
    println!("[meme: {}]", idea.meme_template.template_name);
    println!("{}", idea.copy_text(IdeaSection::Meme));
    println!("visual: {}", idea.meme_template.visual_style);
    println!();
    println!("[reels]");
    println!("{}", idea.copy_text(IdeaSection::Reels));
    println!(
        "audio: {}\noverlays: {}",
        idea.reels_script.audio_suggestion, idea.reels_script.text_overlays
    );
    println!();
    println!("[captions]");
    println!("{}", idea.copy_text(IdeaSection::Captions));
    println!();
}
