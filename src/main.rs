use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use minimal_match::{
    is_group, is_match_op, is_proxy, CountArg, MatchProxy, MinimalObject, Node, Value,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Op {
    /// One or more
    Plus,
    /// Zero or one
    Tilde,
    /// Zero or more
    Star,
    /// Counted, see --range
    Count,
    /// Alternation with --or
    Alt,
    /// The proxy itself
    Bare,
}

/// Render the match expression built from VALUES and an operator.
#[derive(Debug, Parser)]
#[command(name = "minimal-match", version)]
struct Cli {
    /// Values to proxy; two or more build a group
    #[arg(required = true)]
    values: Vec<String>,

    #[arg(long, value_enum, default_value_t = Op::Plus)]
    op: Op,

    /// Bounds for `--op count`: N or LO..HI
    #[arg(long, default_value = "1")]
    range: String,

    /// Right-hand value for `--op alt`
    #[arg(long, default_value = "nil")]
    or: String,

    /// Build in non-greedy mode
    #[arg(long)]
    non_greedy: bool,

    /// Log operator forwarding at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn parse_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(x) = raw.parse::<f64>() {
        return Value::Float(x);
    }
    match raw {
        "nil" => Value::Nil,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match raw.strip_prefix(':') {
            Some(sym) if !sym.is_empty() => Value::Sym(sym.to_string()),
            _ => Value::Str(raw.to_string()),
        },
    }
}

fn parse_range(raw: &str) -> Result<CountArg> {
    match raw.split_once("..") {
        Some((lo, hi)) => {
            let lo = lo.trim().parse::<i64>().with_context(|| format!("bad lower bound in {raw:?}"))?;
            let hi = hi.trim().parse::<i64>().with_context(|| format!("bad upper bound in {raw:?}"))?;
            Ok(CountArg::Range(lo, hi))
        }
        None => Ok(CountArg::Value(parse_value(raw))),
    }
}

fn build(cli: &Cli) -> Result<Node> {
    let values = cli.values.iter().map(|raw| parse_value(raw)).collect();
    let proxy = MatchProxy::group(values)?;
    if cli.non_greedy {
        proxy.set_non_greedy_mode()?;
    }
    let node = match cli.op {
        Op::Plus => proxy.one_or_more()?,
        Op::Tilde => proxy.zero_or_one()?,
        Op::Star => proxy
            .zero_or_more_as_sequence()?
            .into_iter()
            .next()
            .context("zero-or-more produced an empty sequence")?,
        Op::Count => proxy.range(parse_range(&cli.range)?)?,
        Op::Alt => proxy.alternate_with(parse_value(&cli.or))?,
        Op::Bare => proxy,
    };
    Ok(node)
}

// Usage: minimal-match [--op plus|tilde|star|count|alt|bare] [--non-greedy] <values>...
fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let node = build(&cli)?;
    let ancestry: Vec<&str> = node.header().ancestry().iter().map(|t| t.name()).collect();

    println!("text:     {node}");
    println!("inspect:  {}", node.inspect());
    println!("ancestry: {}", ancestry.join(" < "));
    println!(
        "tags:     proxy={} match_op={} group={}",
        is_proxy(&node),
        is_match_op(&node),
        is_group(&node)
    );
    Ok(())
}
