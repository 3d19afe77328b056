use crate::{
    Result,
    router::RouteTable,
};

pub fn run(table: &RouteTable) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&table.summaries())?);
    Ok(())
}
