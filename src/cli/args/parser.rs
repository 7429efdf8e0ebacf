//! Module defining the command line argument parser.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{self, AppSettings, Arg, ArgMatches};
use lgtm::{share, Color, Config, ConfigPatch, RawConfig, RenderOptions};
use lgtm::validation::sanitize_and_validate;
use lgtm::constants::{preset_color, BACKGROUND_COLOR_PRESETS, TEXT_COLOR_PRESETS};

use super::{NAME, VERSION};
use super::model::{ArgsError, Options, Output};


impl<'a> TryFrom<ArgMatches<'a>> for Options {
    type Error = ArgsError;

    fn try_from(matches: ArgMatches<'a>) -> Result<Self, Self::Error> {
        let verbose_count = matches.occurrences_of(OPT_VERBOSE) as isize;
        let quiet_count = matches.occurrences_of(OPT_QUIET) as isize;
        let verbosity = verbose_count - quiet_count;

        let config = stamp_config(&matches)?;
        let render = render_options(&matches)?;
        let font_directory = matches.value_of(OPT_FONT_DIR).map(PathBuf::from);

        // Output path can be set explicit to stdout via `-`.
        let output = match matches.value_of(OPT_OUTPUT).map(|p| p.trim()) {
            Some("-") => Output::Stdout,
            Some(p) => Output::File(PathBuf::from(p)),
            None => Output::Generated,
        };
        let link_base = matches.value_of(OPT_LINK).map(String::from);
        let save_directory = matches.value_of(OPT_SAVE).map(PathBuf::from);

        Ok(Options{verbosity, config, render, font_directory,
                   output, link_base, save_directory})
    }
}

/// Assemble the stamp config: the base from --url or --json (if any),
/// then the template, the individual style flags, and the text on top.
fn stamp_config(matches: &ArgMatches) -> Result<Config, ArgsError> {
    let mut config = if let Some(link) = matches.value_of(OPT_URL) {
        share::decode(link).ok_or_else(|| ArgsError::Link(link.to_owned()))?
    } else if let Some(path) = matches.value_of(OPT_JSON) {
        config_from_json(path)?
    } else {
        Config::default()
    };

    if let Some(template) = matches.value_of(OPT_TEMPLATE) {
        config.set_template(template.parse()?);
    }

    let mut patch = ConfigPatch::new();
    if let Some(size) = matches.value_of(OPT_SIZE) {
        patch = patch.font_size(size.parse()?);
    }
    if let Some(position) = matches.value_of(OPT_POSITION) {
        patch = patch.text_position(position.parse()?);
    }
    if let Some(color) = matches.value_of(OPT_TEXT_COLOR) {
        patch = patch.text_color(parse_color(TEXT_COLOR_PRESETS, color)?);
    }
    if let Some(color) = matches.value_of(OPT_BG_COLOR) {
        patch = patch.background_color(parse_color(BACKGROUND_COLOR_PRESETS, color)?);
    }
    if let Some(text) = matches.value_of(ARG_TEXT) {
        // Allow for multiline text without literal newlines in the shell.
        patch = patch.text(text.replace("\\n", "\n"));
    }
    patch.apply_to(&mut config);

    let validation = config.validate();
    if !validation.is_valid() {
        return Err(ArgsError::Config(validation));
    }
    Ok(config)
}

/// Read a config from JSON file, or standard input if the path is `-`.
///
/// Text and colors are cleaned up before the config is validated.
fn config_from_json(path: &str) -> Result<Config, ArgsError> {
    let path = PathBuf::from(path);
    let json = if path.as_os_str() == "-" {
        let mut json = String::new();
        io::stdin().read_to_string(&mut json)
            .map_err(|e| ArgsError::JsonIo{path: path.clone(), source: e})?;
        json
    } else {
        fs::read_to_string(&path)
            .map_err(|e| ArgsError::JsonIo{path: path.clone(), source: e})?
    };

    let raw: RawConfig = serde_json::from_str(&json)
        .map_err(|e| ArgsError::Json{path: path.clone(), source: e})?;
    let (raw, validation) = sanitize_and_validate(raw);
    if !validation.is_valid() {
        return Err(ArgsError::Config(validation));
    }
    raw.into_config(&Config::default()).map_err(ArgsError::Config)
}

/// Parse a color given either as a preset name or in the #RRGGBB format.
fn parse_color(presets: &[(&str, Color)], value: &str) -> Result<Color, ArgsError> {
    if let Some(color) = preset_color(presets, value) {
        return Ok(color);
    }
    Color::from_str(value.trim())
        .map_err(|e| ArgsError::Color{value: value.to_owned(), source: e})
}

fn render_options(matches: &ArgMatches) -> Result<RenderOptions, ArgsError> {
    let mut options = RenderOptions::default();
    if let Some(width) = number(matches, OPT_WIDTH)? {
        options.width = width;
    }
    if let Some(height) = number(matches, OPT_HEIGHT)? {
        options.height = height;
    }
    if let Some(scale) = number(matches, OPT_SCALE)? {
        options = options.scale(scale);
    }
    if let Some(format) = matches.value_of(OPT_FORMAT) {
        options = options.format_name(format);
    }
    if let Some(quality) = number(matches, OPT_QUALITY)? {
        options = options.quality(quality);
    }
    Ok(options)
}

/// Parse the value of a numeric option, if it's been given.
fn number<T: FromStr>(matches: &ArgMatches, name: &'static str) -> Result<Option<T>, ArgsError> {
    match matches.value_of(name) {
        Some(value) => value.trim().parse().map(Some)
            .map_err(|_| ArgsError::Number{name, value: value.to_owned()}),
        None => Ok(None),
    }
}


// Parser definition

/// Type of the argument parser object
/// (which is called an "App" in clap's silly nomenclature).
pub type Parser<'p> = clap::App<'p, 'p>;


lazy_static! {
    static ref ABOUT: &'static str = option_env!("CARGO_PKG_DESCRIPTION").unwrap_or("");
}

const ARG_TEXT: &'static str = "text";
const OPT_TEMPLATE: &'static str = "template";
const OPT_SIZE: &'static str = "size";
const OPT_POSITION: &'static str = "position";
const OPT_TEXT_COLOR: &'static str = "text-color";
const OPT_BG_COLOR: &'static str = "bg-color";
const OPT_URL: &'static str = "url";
const OPT_JSON: &'static str = "json";
const OPT_WIDTH: &'static str = "width";
const OPT_HEIGHT: &'static str = "height";
const OPT_SCALE: &'static str = "scale";
const OPT_FORMAT: &'static str = "format";
const OPT_QUALITY: &'static str = "quality";
const OPT_FONT_DIR: &'static str = "font-dir";
const OPT_OUTPUT: &'static str = "output";
const OPT_LINK: &'static str = "link";
const OPT_SAVE: &'static str = "save";
const OPT_VERBOSE: &'static str = "verbose";
const OPT_QUIET: &'static str = "quiet";


/// Create the parser for application's command line.
pub fn create_parser<'p>() -> Parser<'p> {
    let mut parser = Parser::new(*NAME);
    if let Some(ref version) = *VERSION {
        parser = parser.version(version.as_str());
    }
    parser
        .about(*ABOUT)

        .setting(AppSettings::StrictUtf8)

        .setting(AppSettings::UnifiedHelpMessage)
        .setting(AppSettings::DontCollapseArgsInUsage)
        .setting(AppSettings::DeriveDisplayOrder)

        // What the stamp looks like.
        .arg(Arg::with_name(ARG_TEXT)
            .value_name("TEXT")
            .required(false)
            .help("Text of the stamp")
            .long_help(concat!(
                "Text of the stamp, up to 50 characters.\n\n",
                "Use \\n to break it into lines; at most 3 lines are rendered. ",
                "Defaults to LGTM.")))
        .arg(Arg::with_name(OPT_TEMPLATE)
            .long("template").short("t")
            .takes_value(true)
            .value_name("TEMPLATE")
            .help("Template of the stamp (classic, dark, minimal, vibrant, retro)")
            .long_help(concat!(
                "Template of the stamp: classic, dark, minimal, vibrant, or retro.\n\n",
                "The template sets the font size, colors, and text position, ",
                "which can be further adjusted with the other flags.")))
        .arg(Arg::with_name(OPT_SIZE)
            .long("size").short("s")
            .takes_value(true)
            .value_name("SIZE")
            .help("Font size (small, medium, large)"))
        .arg(Arg::with_name(OPT_POSITION)
            .long("position").short("p")
            .takes_value(true)
            .value_name("POSITION")
            .help("Vertical position of the text (top, center, bottom)"))
        .arg(Arg::with_name(OPT_TEXT_COLOR)
            .long("text-color")
            .takes_value(true)
            .value_name("COLOR")
            .help("Text color, as #RRGGBB or a preset name"))
        .arg(Arg::with_name(OPT_BG_COLOR)
            .long("bg-color")
            .takes_value(true)
            .value_name("COLOR")
            .help("Background color, as #RRGGBB or a preset name"))
        .arg(Arg::with_name(OPT_URL)
            .long("url")
            .takes_value(true)
            .value_name("LINK")
            .conflicts_with(OPT_JSON)
            .help("Start from the stamp described by a share link"))
        .arg(Arg::with_name(OPT_JSON)
            .long("json")
            .takes_value(true)
            .value_name("FILE")
            .conflicts_with(OPT_URL)
            .help("Start from the stamp config in a JSON file (`-` for standard input)"))

        // Rendering options.
        .arg(Arg::with_name(OPT_WIDTH)
            .long("width")
            .takes_value(true)
            .value_name("N")
            .help("Width of the image, in logical pixels [default: 800]"))
        .arg(Arg::with_name(OPT_HEIGHT)
            .long("height")
            .takes_value(true)
            .value_name("N")
            .help("Height of the image, in logical pixels [default: 600]"))
        .arg(Arg::with_name(OPT_SCALE)
            .long("scale")
            .takes_value(true)
            .value_name("F")
            .help("Ratio of image pixels to logical pixels [default: 2]"))
        .arg(Arg::with_name(OPT_FORMAT)
            .long("format").short("f")
            .takes_value(true)
            .value_name("FORMAT")
            .help("Image format (png, jpeg, webp) [default: png]"))
        .arg(Arg::with_name(OPT_QUALITY)
            .long("quality")
            .takes_value(true)
            .value_name("Q")
            .help("Quality of JPEG images, between 0 and 1 [default: 0.95]"))
        .arg(Arg::with_name(OPT_FONT_DIR)
            .long("font-dir")
            .takes_value(true)
            .value_name("DIR")
            .help("Directory to look up fonts in before using the built-in one"))

        // Output flags.
        .arg(Arg::with_name(OPT_OUTPUT)
            .long("output").short("o")
            .takes_value(true)
            .value_name("PATH")
            .required(false)
            .help("File to write the rendered image to")
            .long_help(concat!(
                "What file should the final image be written to.\n\n",
                "By default, the image is saved in the current directory ",
                "under a name derived from the text and the current time. ",
                "When this flag is set to `-` (single dash), the image is written ",
                "to standard output so it can be e.g. piped to another program.")))
        .arg(Arg::with_name(OPT_LINK)
            .long("link")
            .takes_value(true)
            .value_name("BASE")
            .help("Print the share link of the stamp, using given base URL"))
        .arg(Arg::with_name(OPT_SAVE)
            .long("save")
            .takes_value(true)
            .value_name("DIR")
            .help("Remember the stamp among the recent ones kept in given directory"))

        // Verbosity flags.
        .arg(Arg::with_name(OPT_VERBOSE)
            .long("verbose").short("v")
            .multiple(true)
            .conflicts_with(OPT_QUIET)
            .help("Increase logging verbosity"))
        .arg(Arg::with_name(OPT_QUIET)
            .long("quiet").short("q")
            .multiple(true)
            .conflicts_with(OPT_VERBOSE)
            .help("Decrease logging verbosity"))

        .help_short("H")
        .version_short("V")
}
