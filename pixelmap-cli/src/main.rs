use std::str::FromStr;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use pixelmap::{
    ChannelMap, ColorRgbw, Engine, EngineOpts, Patch, PixelMapError, Point, UNIVERSE_SIZE,
};

#[derive(Parser, Debug)]
#[command(name = "pixelmap", version)]
struct Cli {
    /// Log structural changes to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the universe map of a patch.
    Map(MapArgs),
    /// Fill every fixture with one color, run a tick and dump the universe buffers.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct PatchArgs {
    /// Fixture descriptor, repeatable:
    /// `line:X0,Y0,X1,Y1:PIXELSxCHANNELS@UNIVERSE.ADDRESS` or
    /// `circle:CX,CY,R:PIXELSxCHANNELS@UNIVERSE.ADDRESS`.
    #[arg(long = "fixture", short = 'f', required = true)]
    fixtures: Vec<FixtureSpec>,

    /// Encode universes in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Skip the channel encoder; universe buffers stay zeroed.
    #[arg(long, default_value_t = false)]
    no_encode: bool,

    /// Skip buffer fingerprinting and changed-universe reporting.
    #[arg(long, default_value_t = false)]
    no_track_changes: bool,
}

impl PatchArgs {
    fn engine_opts(&self) -> EngineOpts {
        EngineOpts {
            parallel: self.parallel,
            threads: self.threads,
            encode_output: !self.no_encode,
            track_changes: !self.no_track_changes,
        }
    }
}

#[derive(Parser, Debug)]
struct MapArgs {
    #[command(flatten)]
    patch: PatchArgs,

    /// Emit JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    patch: PatchArgs,

    /// Fill color as hex `RRGGBB` or `RRGGBBWW`.
    #[arg(long, default_value = "ffffff")]
    color: HexColor,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ShapeSpec {
    Line { start: Point, end: Point },
    Circle { center: Point, radius: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FixtureSpec {
    shape: ShapeSpec,
    pixels: usize,
    channels: u8,
    universe: u16,
    address: u16,
}

impl FromStr for FixtureSpec {
    type Err = PixelMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = |what: &str| PixelMapError::validation(format!("fixture '{s}': {what}"));

        let mut parts = s.splitn(3, ':');
        let (Some(kind), Some(coords), Some(patching)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(bad("expected KIND:GEOMETRY:PIXELSxCHANNELS@UNIVERSE.ADDRESS"));
        };

        let nums = coords
            .split(',')
            .map(|v| v.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| bad("geometry must be comma-separated numbers"))?;
        let shape = match (kind, nums.as_slice()) {
            ("line", &[x0, y0, x1, y1]) => ShapeSpec::Line {
                start: Point::new(x0, y0),
                end: Point::new(x1, y1),
            },
            ("circle", &[cx, cy, r]) => ShapeSpec::Circle {
                center: Point::new(cx, cy),
                radius: r,
            },
            ("line", _) => return Err(bad("line needs X0,Y0,X1,Y1")),
            ("circle", _) => return Err(bad("circle needs CX,CY,R")),
            _ => return Err(bad("kind must be 'line' or 'circle'")),
        };

        let (layout, dmx) = patching
            .split_once('@')
            .ok_or_else(|| bad("missing '@UNIVERSE.ADDRESS'"))?;
        let (pixels, channels) = layout
            .split_once('x')
            .ok_or_else(|| bad("layout must be PIXELSxCHANNELS"))?;
        let (universe, address) = dmx
            .split_once('.')
            .ok_or_else(|| bad("dmx address must be UNIVERSE.ADDRESS"))?;

        Ok(Self {
            shape,
            pixels: pixels.parse().map_err(|_| bad("invalid pixel count"))?,
            channels: channels.parse().map_err(|_| bad("invalid channel count"))?,
            universe: universe.parse().map_err(|_| bad("invalid universe"))?,
            address: address.parse().map_err(|_| bad("invalid address"))?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct HexColor(ColorRgbw);

impl FromStr for HexColor {
    type Err = PixelMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim_start_matches('#');
        let bad = || PixelMapError::validation(format!("color '{s}': expected RRGGBB or RRGGBBWW"));
        if !(hex.len() == 6 || hex.len() == 8) || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let w = if hex.len() == 8 { byte(6)? } else { 0 };
        Ok(Self(ColorRgbw::new(byte(0)?, byte(2)?, byte(4)?, w)))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Map(args) => cmd_map(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn build_patch(args: &PatchArgs) -> anyhow::Result<(Patch, Engine)> {
    let engine = Engine::new(args.engine_opts()).context("engine options")?;

    let mut patch = Patch::new("Patch 0");
    for spec in &args.fixtures {
        let id = match spec.shape {
            ShapeSpec::Line { start, end } => {
                patch.create_line(start, end, spec.pixels, spec.channels)
            }
            ShapeSpec::Circle { center, radius } => {
                patch.create_circle(center, radius, spec.pixels, spec.channels)
            }
        };
        patch.set_dmx_address(id, spec.universe, spec.address)?;
    }
    Ok((patch, engine))
}

fn cmd_map(args: MapArgs) -> anyhow::Result<()> {
    let (mut patch, engine) = build_patch(&args.patch)?;
    engine.advance(&mut patch);

    let maps = patch
        .universe_ids()
        .into_iter()
        .filter_map(|id| ChannelMap::build(&patch, id))
        .collect::<Vec<_>>();

    if args.json {
        let area = patch.render_area();
        let universes = maps
            .iter()
            .map(|map| {
                let used = patch
                    .universe(map.universe_id())
                    .map(|u| u.properties().used_size)
                    .unwrap_or_default();
                serde_json::json!({
                    "universe": map.universe_id(),
                    "used_size": used,
                    "fields": map.fields(),
                    "collisions": map.collisions(),
                })
            })
            .collect::<Vec<_>>();
        let fixtures = patch
            .fixtures()
            .map(|(id, f)| {
                serde_json::json!({
                    "id": id,
                    "name": f.name(),
                    "layout": f.layout(),
                    "dmx": f.dmx_address(),
                    "universes": f.in_universe(),
                })
            })
            .collect::<Vec<_>>();
        let doc = serde_json::json!({
            "patch": patch.name(),
            "render_area": { "min": [area.min.x, area.min.y], "max": [area.max.x, area.max.y] },
            "fixtures": fixtures,
            "universes": universes,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let area = patch.render_area();
    println!(
        "{}: {} fixtures, {} pixels, render area ({}, {}) - ({}, {})",
        patch.name(),
        patch.fixture_count(),
        patch.pixel_count(),
        area.min.x,
        area.min.y,
        area.max.x,
        area.max.y
    );
    for (_, f) in patch.fixtures() {
        let dmx = f.dmx_address();
        println!(
            "  {}: {}x{} @ {}.{} -> universes {:?}",
            f.name(),
            f.layout().pixel_count(),
            f.layout().channels_per_pixel(),
            dmx.universe(),
            dmx.address(),
            f.in_universe()
        );
    }
    for map in &maps {
        let Some(universe) = patch.universe(map.universe_id()) else {
            continue;
        };
        println!(
            "{} (used {}/{UNIVERSE_SIZE})",
            universe.name(),
            universe.properties().used_size
        );
        for field in map.fields() {
            let name = patch.fixture(field.fixture).map(|f| f.name()).unwrap_or("?");
            println!("  {:>3}..{:<3} {name}", field.start, field.end);
        }
        let collisions = map.collisions();
        if !collisions.is_empty() {
            let channels = collisions
                .iter()
                .map(|c| c.channel.to_string())
                .collect::<Vec<_>>();
            println!("  collisions on channels {}", channels.join(", "));
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut patch, engine) = build_patch(&args.patch)?;
    engine.advance(&mut patch);

    let ids = patch.fixtures().map(|(id, _)| id).collect::<Vec<_>>();
    for id in ids {
        patch.fill_color(id, args.color.0)?;
    }
    let report = engine.advance(&mut patch);
    tracing::debug!(?report, "frame encoded");

    for universe in patch.universes() {
        println!("{}", universe.name());
        print!("{}", hex_dump(universe.channels()));
    }
    Ok(())
}

fn hex_dump(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 4);
    for (row, chunk) in data.chunks(16).enumerate() {
        out.push_str(&format!("{:04X}:", row * 16));
        for b in chunk {
            out.push_str(&format!(" {b:02X}"));
        }
        out.push('\n');
    }
    out
}
