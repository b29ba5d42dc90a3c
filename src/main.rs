use abcnote::util::parse_duration;
use abcnote::{Key, NotationContext, Note, Pitch};
use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use env_logger::Env;

fn context_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("key")
                .help("Key signature in effect (e.g. G, Em, Ador)")
                .long("key")
                .short('k')
                .value_name("KEY")
                .default_value("C"),
        )
        .arg(
            Arg::new("unit")
                .help("Unit note length (e.g. 1/8)")
                .long("unit")
                .short('L')
                .value_name("FRACTION")
                .default_value("1/8"),
        )
        .arg(
            Arg::new("octave-base")
                .help("Octave of uppercase letters without octave marks")
                .long("octave-base")
                .allow_hyphen_values(true)
                .value_name("OCTAVE")
                .value_parser(clap::value_parser!(i32))
                .default_value("4"),
        )
}

fn build_context(matches: &ArgMatches) -> Result<NotationContext> {
    let key_name = matches.get_one::<String>("key").unwrap();
    let unit = matches.get_one::<String>("unit").unwrap();
    let octave_base = matches.get_one::<i32>("octave-base").copied().unwrap_or(4);

    let key: Key = key_name
        .parse()
        .with_context(|| format!("Invalid key: {}", key_name))?;
    let unit_duration =
        parse_duration(unit).with_context(|| format!("Invalid unit duration: {}", unit))?;

    Ok(NotationContext::new(key, unit_duration)?.with_octave_base(octave_base))
}

fn run_decode(matches: &ArgMatches) -> Result<()> {
    let context = build_context(matches)?;
    for token in matches.get_many::<String>("tokens").unwrap_or_default() {
        let note = context
            .decode(token)
            .with_context(|| format!("Failed to decode note: {}", token))?;
        println!(
            "{}\t{}\t{}\tvalue={}",
            token,
            note.name(),
            note.duration(),
            note.value()
        );
    }
    Ok(())
}

fn run_encode(matches: &ArgMatches) -> Result<()> {
    let context = build_context(matches)?;
    let pitch_name = matches.get_one::<String>("pitch").unwrap();
    let pitch = Pitch::from_name(pitch_name)
        .with_context(|| format!("Invalid pitch: {}", pitch_name))?;
    let duration = match matches.get_one::<String>("duration") {
        Some(d) => parse_duration(d).with_context(|| format!("Invalid duration: {}", d))?,
        None => context.unit_duration(),
    };

    let note = Note::new(pitch, duration)?;
    let encoded = context
        .encode(&note)
        .with_context(|| format!("Failed to encode note: {}", note))?;
    println!("{}", encoded);
    Ok(())
}

fn run_interval(matches: &ArgMatches) -> Result<()> {
    let from_name = matches.get_one::<String>("from").unwrap();
    let to_name = matches.get_one::<String>("to").unwrap();
    let from = Pitch::from_name(from_name).with_context(|| format!("Invalid pitch: {}", from_name))?;
    let to = Pitch::from_name(to_name).with_context(|| format!("Invalid pitch: {}", to_name))?;

    let interval = to - from;
    println!("{}\t{} semitones", interval, interval.value());
    Ok(())
}

fn run_key(matches: &ArgMatches) -> Result<()> {
    let key_name = matches.get_one::<String>("name").unwrap();
    let key: Key = key_name
        .parse()
        .with_context(|| format!("Invalid key: {}", key_name))?;

    let join = |pcs: Vec<abcnote::PitchClass>| {
        pcs.iter()
            .map(|pc| pc.name())
            .collect::<Vec<_>>()
            .join(" ")
    };

    println!("key:        {} ({} {})", key, key.tonic(), key.mode());
    println!("signature:  {}", join(key.key_signature()));
    println!("scale:      {}", join(key.scale()));
    println!("steps:      {}", key.intervals());
    println!("rel. major: {}", key.relative_major());
    println!("rel. minor: {}", key.relative_minor());
    Ok(())
}

fn main() -> Result<()> {
    let matches = Command::new("abcnote")
        .version(env!("CARGO_PKG_VERSION"))
        .about("ABC note token converter")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .help("Enable verbose output")
                .short('v')
                .long("verbose")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .subcommand(context_args(
            Command::new("decode").about("Decode ABC note tokens").arg(
                Arg::new("tokens")
                    .help("Note tokens (e.g. ^f' _B,2 C//)")
                    .required(true)
                    .num_args(1..)
                    .value_name("TOKEN"),
            ),
        ))
        .subcommand(context_args(
            Command::new("encode")
                .about("Encode a pitch and duration as an ABC note token")
                .arg(
                    Arg::new("pitch")
                        .help("Pitch in scientific notation (e.g. F#4)")
                        .required(true)
                        .value_name("PITCH")
                        .index(1),
                )
                .arg(
                    Arg::new("duration")
                        .help("Duration in whole notes (defaults to the unit length)")
                        .long("duration")
                        .short('d')
                        .value_name("FRACTION"),
                ),
        ))
        .subcommand(
            Command::new("interval")
                .about("Name the interval between two pitches")
                .arg(Arg::new("from").required(true).value_name("FROM").index(1))
                .arg(Arg::new("to").required(true).value_name("TO").index(2)),
        )
        .subcommand(
            Command::new("key")
                .about("Show the signature and scale of a key")
                .arg(Arg::new("name").required(true).value_name("KEY").index(1)),
        )
        .get_matches();

    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match matches.subcommand() {
        Some(("decode", sub)) => run_decode(sub),
        Some(("encode", sub)) => run_encode(sub),
        Some(("interval", sub)) => run_interval(sub),
        Some(("key", sub)) => run_key(sub),
        _ => unreachable!("subcommand_required is set"),
    }
}
