// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// metamatrix - Pairwise relationship matrices from typed metadata columns
pub struct Args {
    /// metadata table (.tab/.tsv) with a `name` column and .d/.c/.ll columns
    #[argh(option, short = 'f')]
    pub file: Option<String>,

    /// output directory (default: `meta` beside the metadata file, recreated)
    #[argh(option, short = 'o')]
    pub out_dir: Option<String>,

    /// fraction of ranked Euclidean distances under which continuous samples relate (0-1, default: 0.10)
    #[argh(option, short = 'e', default = "0.10")]
    pub eucdistper: f64,

    /// distance in km under which geo-coordinate samples relate (default: 1000)
    #[argh(option, short = 's', default = "1000.0")]
    pub sampledist: f64,

    /// comma-separated sample names to restrict the matrices to
    #[argh(option, short = 'n')]
    pub names: Option<String>,

    /// file of sample names to restrict the matrices to (one per line)
    #[argh(option, short = 'l')]
    pub list: Option<String>,

    /// geodesic distance method: vincenty, haversine (default: vincenty)
    #[argh(option, default = "String::from(\"vincenty\")")]
    pub geo_method: String,

    /// write summary.json with per-column statistics into the output directory
    #[argh(switch)]
    pub summary: bool,

    /// validate inputs and report column kinds without writing anything
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}

impl Args {
    /// Arguments with every option at its default
    pub fn with_file(file: &str) -> Self {
        Self {
            file: Some(file.to_string()),
            out_dir: None,
            eucdistper: 0.10,
            sampledist: 1000.0,
            names: None,
            list: None,
            geo_method: String::from("vincenty"),
            summary: false,
            dry_run: false,
            config: None,
            generate_config: false,
        }
    }
}
