use log::{info, LevelFilter};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use structopt::StructOpt;

use std::time;

use rbix::RbTree;

/// Command line options.
#[derive(Clone, StructOpt)]
pub struct Opt {
    #[structopt(long = "seed")]
    seed: Option<u64>,

    #[structopt(long = "loads", default_value = "1000000")] // default 1M
    loads: usize,

    #[structopt(long = "deletes", default_value = "0")]
    deletes: usize,

    #[structopt(long = "validate")]
    validate: bool,

    #[structopt(long = "dump")]
    dump: bool,

    #[structopt(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

fn main() {
    let opts = Opt::from_args();
    TermLogger::init(
        opts.log_level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let seed = opts.seed.unwrap_or_else(random);
    info!("perf seed {}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut keys: Vec<u64> = Vec::with_capacity(opts.loads);
    let (key, val): (u64, u64) = (rng.gen(), rng.gen());
    let mut index: RbTree<u64, u64> = RbTree::new(key, val);
    keys.push(key);

    // initial load
    let start = time::Instant::now();
    for _i in 1..opts.loads {
        let (key, val): (u64, u64) = (rng.gen(), rng.gen());
        index.insert(key, val);
        keys.push(key);
    }
    println!("loaded {} items in {:?}", index.len(), start.elapsed());

    let start = time::Instant::now();
    let mut n_deleted = 0;
    for _i in 0..opts.deletes {
        if keys.is_empty() {
            break;
        }
        let key = keys.swap_remove(rng.gen::<usize>() % keys.len());
        if index.delete(&key).is_some() {
            n_deleted += 1;
        }
    }
    println!("deleted {} items in {:?}", n_deleted, start.elapsed());

    let start = time::Instant::now();
    let mut n = 0;
    for _e in index.iter() {
        n += 1;
    }
    println!("iterated {} items in {:?}", n, start.elapsed());

    if opts.validate {
        let start = time::Instant::now();
        match index.validate() {
            Ok(n_blacks) => println!("validated, black-height {} in {:?}", n_blacks, start.elapsed()),
            Err(err) => println!("validate failed: {}", err),
        }
    }

    if opts.dump {
        print!("{}", index.dump());
    }
}
