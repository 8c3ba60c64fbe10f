use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use startrail_core::io::discover::list_images;
use startrail_core::io::image_io::probe_dimensions;

use super::parse_extensions;

#[derive(Args)]
pub struct InfoArgs {
    /// Folder to scan
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Comma-separated, case-sensitive file extensions to include
    #[arg(long, default_value = "jpg,JPG")]
    pub ext: String,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let extensions = parse_extensions(&args.ext);
    let images = list_images(&args.dir, &extensions)?;

    println!("Folder:      {}", args.dir.display());
    println!("Extensions:  {}", extensions.join(", "));
    println!("Images:      {}", images.len());

    let Some(first) = images.first() else {
        return Ok(());
    };
    let expected = probe_dimensions(first)?;
    println!("Dimensions:  {}", expected);

    let mut mismatched = 0;
    for path in &images {
        match probe_dimensions(path) {
            Ok(dims) if dims == expected => {}
            Ok(dims) => {
                mismatched += 1;
                println!("  size differs: {} ({})", path.display(), dims);
            }
            Err(e) => {
                mismatched += 1;
                println!("  unreadable:   {}", e);
            }
        }
    }
    if mismatched > 0 {
        println!("{} image(s) would abort a stack", mismatched);
    }

    Ok(())
}
