//! Prints the OpenAPI document for the word game backend to stdout.

use utoipa::OpenApi;
use wordgame_back::services::documentation::ApiDoc;

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi();
    println!("{}", doc.to_pretty_json()?);
    Ok(())
}
