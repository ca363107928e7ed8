//! Static screen viewer
//!
//! Composes one menu template with values and arts given on the command
//! line, prints the resolved grid and, when a font is available, builds the
//! glyph atlas and the frame geometry for it.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use view_engine::prelude::*;
use view_engine::render::texture::TextureHandle;

const DEFAULT_TEMPLATE: &str = "start_game_screen";
const DEFAULT_VIEWPORT: &str = "960x540";
const FRAME_MS: u32 = 16;

#[derive(Debug)]
struct ViewerArgs {
    template: String,
    values: Vec<(String, String)>,
    arts: Vec<ArtRef>,
    font: Option<PathBuf>,
    config: Option<PathBuf>,
    atlas_out: Option<PathBuf>,
    viewport: (u32, u32),
}

fn main() -> Result<()> {
    view_engine::foundation::logging::init_with_level(log::LevelFilter::Info);

    let args = parse_args()?;
    log::info!("Starting menu viewer for '{}'", args.template);
    run(&args)
}

fn parse_args() -> Result<ViewerArgs> {
    let matches = Command::new("menu_viewer")
        .about("Composes a menu template and dumps its grid and glyph atlas")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("template")
                .value_name("TEMPLATE")
                .help("Template name or .yml path")
                .default_value(DEFAULT_TEMPLATE),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .value_name("KEY=VALUE")
                .help("Value for the main value map (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("art")
                .long("art")
                .value_name("NAME=PATH")
                .help("Art variant and file for the next art slot (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("font")
                .long("font")
                .value_name("PATH")
                .help("Monospace font file for the atlas"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Viewer configuration (.toml or .ron)"),
        )
        .arg(
            Arg::new("atlas-out")
                .long("atlas-out")
                .value_name("PNG")
                .help("Write the glyph atlas to this file"),
        )
        .arg(
            Arg::new("viewport")
                .long("viewport")
                .value_name("WxH")
                .help("Viewport size in pixels")
                .default_value(DEFAULT_VIEWPORT),
        )
        .get_matches();

    let pairs = |id: &str| -> Result<Vec<(String, String)>> {
        matches
            .get_many::<String>(id)
            .into_iter()
            .flatten()
            .map(|raw| parse_pair(raw).with_context(|| format!("Invalid --{} argument", id)))
            .collect()
    };

    Ok(ViewerArgs {
        template: matches
            .get_one::<String>("template")
            .cloned()
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
        values: pairs("set")?,
        arts: pairs("art")?
            .into_iter()
            .map(|(name, path)| ArtRef::new(name, path))
            .collect(),
        font: matches.get_one::<String>("font").map(PathBuf::from),
        config: matches.get_one::<String>("config").map(PathBuf::from),
        atlas_out: matches.get_one::<String>("atlas-out").map(PathBuf::from),
        viewport: parse_viewport(
            matches
                .get_one::<String>("viewport")
                .map_or(DEFAULT_VIEWPORT, String::as_str),
        )?,
    })
}

fn run(args: &ViewerArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ViewerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => ViewerConfig::default(),
    };
    if let Some(font) = &args.font {
        config.font = config.font.with_path(font);
    }
    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let resolver = AssetResolver::new(config.paths.clone());
    let mut main = ValueMap::new();
    for (key, value) in &args.values {
        main.set(key.as_str(), value.as_str());
    }
    main.set_if_missing("main", format!("v {}", env!("CARGO_PKG_VERSION")));

    let request = ScreenRequest::new(&args.template, &main).with_arts(&args.arts);
    let Some(menu) = Screen::build(&resolver, &request) else {
        bail!(
            "Template '{}' could not be loaded (looked for {})",
            args.template,
            resolver.resolve_menu(&args.template).display()
        );
    };

    println!("{}", menu.view);
    log::info!("Grid: {} columns x {} rows", menu.view.cols(), menu.view.rows());

    let Some(font_path) = config.font.resolve_path() else {
        log::warn!("No font found, skipping atlas");
        return Ok(());
    };
    let rasterizer = FontdueRasterizer::from_file(&font_path, config.font.size_px, config.font.fallback_cell)
        .with_context(|| format!("Failed to load font {}", font_path.display()))?;

    let atlas = FontAtlas::build(&menu.view, &rasterizer).context("Failed to build glyph atlas")?;
    if let Some(out) = &args.atlas_out {
        atlas.save_png(out)?;
    }

    let mut uploader = MemoryTextureUploader::new();
    let texture: TextureHandle = uploader.upload(atlas.image())?;
    let state = RenderState::from_atlas(&atlas, texture, &menu.view);

    let total_cells = state.grid_cols() * state.grid_rows();
    let mut transition = ScreenTransition::begin(
        config.transition.mode,
        total_cells,
        config.transition.speed.duration_ms(),
    );
    let mut frames = 0usize;
    let frame = loop {
        let frame = GridRenderer::build_frame(
            &state,
            &menu.view,
            args.viewport,
            transition.alpha(),
            transition.reveal_limit(),
        );
        frames += 1;
        if !transition.is_active() {
            break frame;
        }
        transition.tick(FRAME_MS);
    };

    log::info!(
        "{:?} transition settled after {} frames; final frame has {} quads ({} vertex bytes)",
        transition.mode(),
        frames,
        frame.quad_count(),
        frame.vertex_bytes().len()
    );
    state.release(&mut uploader);
    Ok(())
}

fn parse_pair(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        bail!("empty key in '{}'", raw);
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_viewport(raw: &str) -> Result<(u32, u32)> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("expected WxH, got '{}'", raw))?;
    let width: u32 = w.trim().parse().context("Invalid viewport width")?;
    let height: u32 = h.trim().parse().context("Invalid viewport height")?;
    if width == 0 || height == 0 {
        bail!("viewport must be non-empty, got {}x{}", width, height);
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("hero_name=Ato").unwrap(), ("hero_name".to_string(), "Ato".to_string()));
        assert_eq!(parse_pair("k=a=b").unwrap().1, "a=b");
        assert_eq!(parse_pair("empty=").unwrap().1, "");
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("800x600").unwrap(), (800, 600));
        assert_eq!(parse_viewport("1024X768").unwrap(), (1024, 768));
        assert!(parse_viewport("800").is_err());
        assert!(parse_viewport("0x600").is_err());
        assert!(parse_viewport("axb").is_err());
    }
}
