// pipelines.rs - End-to-end runs of both tools through the library API

use metamatrix::cli::{validate_args, Args};
use metamatrix::core::MetadataMatrixBuilder;
use metamatrix::normalizer::{normalize_matrix, DISTANCE_FILE, NEARNESS_FILE};
use metamatrix::output::prepare_out_dir;
use metamatrix::{AliasTable, MetadataTable};
use std::fs;
use std::path::Path;

const METADATA: &str = "name\tbiome.d\tdepth.c\tsite.ll\n\
                        s3\tmarine\t5\t21.3069,-157.8583\n\
                        s1\tsoil\t0\t32.2226,-110.9747\n\
                        s4\tsoil\t8\t33.4484,-112.0740\n\
                        s2\tmarine\t2\t32.2226,-110.9747\n";

fn read_matrix(path: &Path) -> Vec<Vec<String>> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| line.split('\t').map(|s| s.to_string()).collect())
        .collect()
}

fn run_builder(args: &Args) -> metamatrix::Result<std::path::PathBuf> {
    let validation = validate_args(args)?;
    let table = MetadataTable::from_tsv(&validation.metadata_file)?;
    let builder =
        MetadataMatrixBuilder::new(&table, validation.restriction.as_deref(), validation.params)?;
    prepare_out_dir(&validation.out_dir)?;
    builder.write_all(&validation.out_dir)?;
    Ok(validation.out_dir)
}

#[test]
fn builder_writes_one_matrix_per_column() {
    let dir = tempfile::tempdir().unwrap();
    let meta = dir.path().join("metadata.tab");
    fs::write(&meta, METADATA).unwrap();

    // Stale output is removed
    fs::create_dir_all(dir.path().join("meta")).unwrap();
    fs::write(dir.path().join("meta/old.meta"), "stale").unwrap();

    let mut args = Args::with_file(meta.to_str().unwrap());
    args.eucdistper = 0.5;
    let out_dir = run_builder(&args).unwrap();

    assert_eq!(out_dir, dir.path().join("meta"));
    assert!(!out_dir.join("old.meta").exists());

    for column in ["biome.d", "depth.c", "site.ll"] {
        let rows = read_matrix(&out_dir.join(format!("{}.meta", column)));
        assert_eq!(rows[0], vec!["", "s1", "s2", "s3", "s4"]);
        assert_eq!(rows.len(), 5);
        for i in 1..5 {
            assert_eq!(rows[i][0], rows[0][i]);
            assert_eq!(rows[i][i], "1");
            for j in 1..5 {
                assert_eq!(rows[i][j], rows[j][i]);
            }
        }
    }

    let biome = read_matrix(&out_dir.join("biome.d.meta"));
    assert_eq!(biome[1][4], "1"); // s1, s4 soil
    assert_eq!(biome[1][2], "0");

    // Depth distances: 2, 5, 8, 3, 6, 3 -> sorted 2, 3, 3, 5, 6, 8; rank 3 -> cutoff 3
    let depth = read_matrix(&out_dir.join("depth.c.meta"));
    assert_eq!(depth[1][2], "1"); // s1, s2: 2
    assert_eq!(depth[2][3], "0"); // s2, s3: 3 is not below 3
    assert_eq!(depth[1][4], "0");

    let site = read_matrix(&out_dir.join("site.ll.meta"));
    assert_eq!(site[1][2], "1"); // same point
    assert_eq!(site[1][4], "1"); // tucson, phoenix
    assert_eq!(site[1][3], "0"); // honolulu
}

#[test]
fn builder_honours_restriction() {
    let dir = tempfile::tempdir().unwrap();
    let meta = dir.path().join("metadata.tab");
    fs::write(&meta, METADATA).unwrap();
    let list = dir.path().join("samples.txt");
    fs::write(&list, "s4\n\ns2\n").unwrap();

    let mut args = Args::with_file(meta.to_str().unwrap());
    args.list = Some(list.display().to_string());
    args.out_dir = Some(dir.path().join("restricted").display().to_string());
    let out_dir = run_builder(&args).unwrap();

    let biome = read_matrix(&out_dir.join("biome.d.meta"));
    assert_eq!(biome[0], vec!["", "s2", "s4"]);
    assert_eq!(biome[1], vec!["s2", "1", "0"]);
}

#[test]
fn builder_rejects_bad_inputs_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let meta = dir.path().join("metadata.tab");
    fs::write(&meta, "name\tbiome\ns1\tsoil\n").unwrap();

    let err = run_builder(&Args::with_file(meta.to_str().unwrap())).unwrap_err();
    assert!(err.is_config());
    assert!(!dir.path().join("meta").exists());

    fs::write(&meta, METADATA).unwrap();
    let mut args = Args::with_file(meta.to_str().unwrap());
    args.names = Some("s1,s9".to_string());
    assert!(run_builder(&args).unwrap_err().is_data());
    assert!(!dir.path().join("meta").exists());
}

#[test]
fn normalizer_writes_distance_and_nearness() {
    let dir = tempfile::tempdir().unwrap();
    let matrix = dir.path().join("mash.tab");
    fs::write(
        &matrix,
        "\t/genomes/a.fna\t/genomes/b.fna\n/genomes/a.fna\t0\t0.1\n/genomes/b.fna\t0.1\t0\n",
    )
    .unwrap();
    let alias = dir.path().join("alias.tab");
    fs::write(&alias, "name\talias\na.fna\tIsolate-A\n").unwrap();

    let aliases = AliasTable::from_file(&alias).unwrap();
    normalize_matrix(&matrix, dir.path(), 3, &aliases).unwrap();

    let distance = read_matrix(&dir.path().join(DISTANCE_FILE));
    let nearness = read_matrix(&dir.path().join(NEARNESS_FILE));
    assert_eq!(distance[0], vec!["", "Isolate-A", "b.fna"]);
    assert_eq!(distance[0], nearness[0]);
    assert_eq!(distance[1], vec!["Isolate-A", "0", "0.1"]);
    assert_eq!(nearness[1], vec!["Isolate-A", "1.000", "0.900"]);
    assert_eq!(nearness[2], vec!["b.fna", "0.900", "1.000"]);
}

#[test]
fn normalizer_rejects_alias_file_without_columns() {
    let dir = tempfile::tempdir().unwrap();
    let alias = dir.path().join("alias.tab");
    fs::write(&alias, "sample\tdisplay\na\tb\n").unwrap();
    assert!(AliasTable::from_file(&alias).unwrap_err().is_config());
}
