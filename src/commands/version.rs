use crate::core::{build_info::BuildInfo, error::Result};

pub fn execute_version(build_info: &BuildInfo, json: bool) -> Result<()> {
    if json {
        println!("{}", build_info.to_json()?);
    } else {
        println!("{build_info}");
    }
    Ok(())
}
