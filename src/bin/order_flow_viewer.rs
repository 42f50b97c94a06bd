//! Order Flow Viewer - renders the sample order book and trade tape
//!
//! Usage: order-flow-viewer [--text] [config.yaml]
//!
//! Without `--text` the chart opens in the terminal's alternate screen
//! (press `q` or `Esc` to leave). With `--text` it is printed to stdout.

use anyhow::Result;
use tracing::info;

use order_flow_viz::bin_common::{load_config_from_env, parse_args, ViewerArgs};
use order_flow_viz::orderflow::domain::sample::{sample_book, sample_trades};
use order_flow_viz::orderflow::{init_tracing, render_with_style, show, ChartStyle, ViewerConfig};

fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let args = ViewerArgs::parse(&parse_args());
    let config_path = load_config_from_env(args.config_type());
    let config = ViewerConfig::load_or_default(&config_path)?;

    // Logging stays off in interactive mode - it would corrupt the alternate screen display
    if args.text {
        init_tracing(&config.log_level);
        config.log();
    }

    let style = ChartStyle::try_from(&config.style)?;
    let trades = sample_trades()?;
    let chart = render_with_style(&sample_book(), Some(&trades), style)?;

    if args.text {
        info!(
            "Rendering {} bars, {} spreads",
            chart.layout().bars.len(),
            chart.layout().spreads.len()
        );
        println!("{}", chart.to_text(config.export.width, config.export.height));
    } else {
        show(&chart)?;
    }

    Ok(())
}
