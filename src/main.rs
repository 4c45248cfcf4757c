use az_tree::{fetch_inventory, init_logging, write_snapshot};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    init_logging();
    dotenv::dotenv().ok();
    //
    log::info!("#Start main()");

    let Some(tree) = fetch_inventory().await? else {
        return Ok(());
    };

    write_snapshot(&tree)?;

    Ok(())
}
