extern crate clap;

use clap::{Arg, App, SubCommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::process::exit;
use std::time::SystemTime;

use wordgrid::*;

fn output_matches_as_tsv(matches: &[Match]) {
    for m in matches {
        let direction = match m.direction {
            Some(direction) => direction.abbreviation(),
            None => "-",
        };
        println!("{}\t{}\t{}\t{}", m.text, m.row, m.column, direction);
    }
}

fn output_matches_as_json(matches: &[Match]) {
    println!("[");
    let l = matches.len();
    for (i, m) in matches.iter().enumerate() {
        print!("    {{ \"text\": \"{}\", \"row\": {}, \"column\": {}, \"direction\": ", m.text.replace("\\", "\\\\").replace("\"","\\\""), m.row, m.column);
        match m.direction {
            Some(direction) => print!("\"{}\"", direction),
            None => print!("null"),
        }
        if i < l - 1 {
            println!(" }},");
        } else {
            println!(" }}");
        }
    }
    println!("]");
}

fn random_grid(args: &clap::ArgMatches) -> CharGrid {
    let rows = args.value_of("rows").unwrap().parse::<usize>().expect("Rows should be a positive integer");
    let columns = args.value_of("columns").unwrap().parse::<usize>().expect("Columns should be a positive integer");
    if rows == 0 || columns == 0 {
        eprintln!("ERROR: The grid needs at least one row and one column");
        exit(1);
    }
    let mut rng = if let Some(seed) = args.value_of("seed") {
        StdRng::seed_from_u64(seed.parse::<u64>().expect("Seed should be an integer"))
    } else {
        StdRng::from_entropy()
    };
    CharGrid::random(rows, columns, &mut rng)
}

fn grid_arguments<'a,'b>() -> Vec<clap::Arg<'a,'b>> {
    let mut args: Vec<Arg> = Vec::new();
    args.push(Arg::with_name("rows")
        .long("rows")
        .short("r")
        .help("Number of rows of a randomly generated grid")
        .takes_value(true)
        .default_value("20"));
    args.push(Arg::with_name("columns")
        .long("columns")
        .short("c")
        .help("Number of columns of a randomly generated grid")
        .takes_value(true)
        .default_value("20"));
    args.push(Arg::with_name("seed")
        .long("seed")
        .help("Seed for the random generator, for reproducible grids")
        .takes_value(true));
    args
}

fn dictionary_arguments<'a,'b>() -> Vec<clap::Arg<'a,'b>> {
    let mut args: Vec<Arg> = Vec::new();
    args.push(Arg::with_name("dictionary")
        .long("dictionary")
        .short("d")
        .help("Dictionary with one word per line (may be used multiple times). Blank lines are ignored.")
        .takes_value(true)
        .number_of_values(1)
        .multiple(true)
        .required(true));
    args.push(Arg::with_name("capacity")
        .long("capacity")
        .help("Initial number of slots in the index; set this to the expected number of prefixes to avoid growing the index while loading")
        .takes_value(true)
        .default_value("101"));
    args
}

fn load_model(args: &clap::ArgMatches, debug: bool) -> WordSearchModel {
    let capacity = args.value_of("capacity").unwrap().parse::<usize>().expect("Capacity should be an integer");
    let mut model = WordSearchModel::with_capacity(capacity, debug);
    eprintln!("Loading dictionaries...");
    for filename in args.values_of("dictionary").unwrap().collect::<Vec<&str>>() {
        model.read_dictionary(filename).expect(&format!("Error reading dictionary {}", filename));
    }
    eprintln!(" - {} words, {} prefixes", model.word_count, model.index.live_size());
    model
}

fn main() {
    let mut solve_args = dictionary_arguments();
    solve_args.extend(grid_arguments());
    solve_args.push(Arg::with_name("grid")
        .long("grid")
        .short("g")
        .help("Grid file, one row per line, cells either adjacent or separated by whitespace. If not specified, a random grid is generated")
        .takes_value(true));
    solve_args.push(Arg::with_name("algorithm")
        .long("algorithm")
        .short("a")
        .help("Search algorithm: naive (check every string along every ray) or pruned (abandon rays that are not a prefix of any word)")
        .takes_value(true)
        .possible_values(&["naive", "pruned"])
        .default_value("pruned"));
    solve_args.push(Arg::with_name("directions")
        .long("directions")
        .help("Comma separated list of directions to search in: e,w,s,n,se,nw,ne,sw or all")
        .takes_value(true)
        .default_value("all"));
    solve_args.push(Arg::with_name("single-thread")
        .long("single-thread")
        .help("Search on a single thread only")
        .required(false));
    solve_args.push(Arg::with_name("json")
        .long("json")
        .short("j")
        .help("Output json instead of tsv")
        .required(false));
    solve_args.push(Arg::with_name("print-grid")
        .long("print-grid")
        .short("p")
        .help("Print the grid (to standard error) before searching")
        .required(false));

    let rootargs = App::new("Wordgrid")
                    .version("0.1")
                    .about("Finds dictionary words in a grid of characters, in all eight directions")
                    .subcommand(
                        SubCommand::with_name("solve")
                            .about("Find all dictionary words in a grid")
                            .args(&solve_args)
                    )
                    .subcommand(
                        SubCommand::with_name("generate")
                            .about("Generate and output a random grid")
                            .args(&grid_arguments())
                    )
                    .subcommand(
                        SubCommand::with_name("index")
                            .about("Build the prefix index and output its statistics")
                            .args(&dictionary_arguments())
                    )
                    .arg(Arg::with_name("debug")
                        .long("debug")
                        .short("D")
                        .help("Debug")
                        .required(false))
                    .get_matches();

    let debug = rootargs.is_present("debug");

    if let Some(args) = rootargs.subcommand_matches("generate") {
        print!("{}", random_grid(args));
    } else if let Some(args) = rootargs.subcommand_matches("index") {
        let model = load_model(args, debug);
        println!("dictionaries\t{}", model.dictionaries.join(","));
        println!("words\t{}", model.word_count);
        println!("prefixes\t{}", model.index.live_size());
        println!("occupied\t{}", model.index.occupied());
        println!("capacity\t{}", model.index.capacity());
        println!("longest\t{}", model.index.max_key_length());
    } else if let Some(args) = rootargs.subcommand_matches("solve") {
        let params = SearchParameters::default()
            .with_algorithm(args.value_of("algorithm").unwrap().parse::<Algorithm>().expect("Invalid algorithm"))
            .with_directions(Directions::parse(args.value_of("directions").unwrap()).unwrap_or_else(|e| {
                eprintln!("ERROR: {}", e);
                exit(1);
            }));
        let params = if args.is_present("single-thread") {
            params.with_single_thread()
        } else {
            params
        };

        let model = load_model(args, debug);

        let grid = if let Some(filename) = args.value_of("grid") {
            CharGrid::read(filename).unwrap_or_else(|e| {
                eprintln!("ERROR: Unable to read grid {}: {}", filename, e);
                exit(1);
            })
        } else {
            random_grid(args)
        };
        if args.is_present("print-grid") {
            eprint!("\n{}\n", grid);
        }

        eprintln!("Searching...");
        let begintime = SystemTime::now();
        let matches = model.find_words(&grid, &params);
        let duration = SystemTime::now().duration_since(begintime).expect("clock can't go backwards").as_millis();
        eprintln!(" - Found {} matches, elapsed time: {} ms", matches.len(), duration);

        if args.is_present("json") {
            output_matches_as_json(&matches);
        } else {
            output_matches_as_tsv(&matches);
        }
    } else {
        eprintln!("No command specified, see --help");
        exit(2);
    }
}
