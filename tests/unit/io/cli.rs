//! Tests for argument parsing and the collection batch runner

#[cfg(test)]
mod tests {
    use chromagrid::io::cli::{BatchRunner, Cli, init_logging};
    use chromagrid::io::collection::{CollectionDocument, ItemId};
    use clap::Parser;
    use image::{Rgb, RgbImage};
    use serde_json::json;
    use std::path::Path;
    use std::time::Duration;

    fn write_collection(dir: &Path) -> std::path::PathBuf {
        let covers = [
            ("red.png", [220, 30, 30]),
            ("blue.png", [30, 30, 220]),
            ("pink.png", [230, 60, 90]),
        ];
        for (name, rgb) in covers {
            RgbImage::from_pixel(6, 6, Rgb(rgb))
                .save(dir.join(name))
                .unwrap();
        }

        let document = json!({
            "fetchedAt": "2024-05-01T12:00:00Z",
            "releases": [
                {"id": 1, "title": "Red", "cover_image": "red.png"},
                {"id": 2, "title": "Blue", "cover_image": "blue.png"},
                {"id": 3, "title": "Pink", "cover_image": "pink.png"},
                {"id": 4, "title": "Gone", "cover_image": "missing.png"}
            ]
        });
        let path = dir.join("library.json");
        std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();
        path
    }

    // Tests defaults when only the collection is given
    // Verified by changing default column count
    #[test]
    fn test_default_arguments() {
        let cli = Cli::try_parse_from(["chromagrid", "library.json"]).unwrap();
        let config = cli.layout_config();
        assert_eq!(config.palette_size, 4);
        assert_eq!(config.columns, 5);
        assert_eq!(config.downsample, (50, 50));
        assert_eq!(config.seed, None);
        assert_eq!(cli.key, "releases");
        assert_eq!(cli.output_path(), Path::new("library.json"));
        assert!(cli.should_show_progress());
    }

    // Tests flags map onto the layout configuration
    // Verified by ignoring the size flag
    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "chromagrid",
            "library.json",
            "-k",
            "6",
            "--columns",
            "3",
            "--size",
            "32",
            "--seed",
            "9",
            "--delay-ms",
            "0",
            "--timeout-secs",
            "5",
            "--output",
            "out.json",
            "--quiet",
        ])
        .unwrap();
        let config = cli.layout_config();
        assert_eq!(config.palette_size, 6);
        assert_eq!(config.columns, 3);
        assert_eq!(config.downsample, (32, 32));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(cli.output_path(), Path::new("out.json"));
        assert!(!cli.should_show_progress());
    }

    // Tests the collection argument is required
    // Verified by making the collection optional
    #[test]
    fn test_missing_collection() {
        assert!(Cli::try_parse_from(["chromagrid"]).is_err());
    }

    // Tests a full run writes a reordered permutation and keeps the envelope
    // Verified by saving the unsorted items
    #[test]
    fn test_run_writes_output() {
        init_logging();
        let dir = tempfile::tempdir().unwrap();
        let collection = write_collection(dir.path());
        let output = dir.path().join("out").join("sorted.json");

        let cli = Cli::try_parse_from([
            "chromagrid",
            collection.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
            "--columns",
            "2",
            "--seed",
            "5",
            "--delay-ms",
            "0",
            "--preview",
            "--quiet",
        ])
        .unwrap();
        let report = BatchRunner::new(cli).run().unwrap();
        assert_eq!(report.fallbacks, vec![ItemId::from(4)]);

        let saved = CollectionDocument::load(&output, "releases").unwrap();
        let mut ids: Vec<String> = saved.items.iter().map(|i| i.id().to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(
            saved.envelope.and_then(|e| e.get("fetchedAt").cloned()),
            Some(json!("2024-05-01T12:00:00Z"))
        );

        // Input is untouched when an output path is given
        let original = CollectionDocument::load(&collection, "releases").unwrap();
        assert_eq!(original.items.first().map(|i| i.id().clone()), Some(ItemId::from(1)));
    }

    // Tests in-place rewriting
    // Verified by writing next to the collection
    #[test]
    fn test_run_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let collection = write_collection(dir.path());

        let cli = Cli::try_parse_from([
            "chromagrid",
            collection.to_str().unwrap(),
            "--seed",
            "5",
            "--delay-ms",
            "0",
            "-q",
        ])
        .unwrap();
        let report = BatchRunner::new(cli).run().unwrap();

        let saved = CollectionDocument::load(&collection, "releases").unwrap();
        assert_eq!(saved.items, report.items);
    }

    // Tests invalid parameters fail before the collection is touched
    // Verified by validating after loading
    #[test]
    fn test_run_invalid_parameters() {
        let dir = tempfile::tempdir().unwrap();
        let collection = write_collection(dir.path());
        let before = std::fs::read_to_string(&collection).unwrap();

        let cli = Cli::try_parse_from([
            "chromagrid",
            collection.to_str().unwrap(),
            "--columns",
            "0",
            "-q",
        ])
        .unwrap();
        assert!(BatchRunner::new(cli).run().is_err());
        assert_eq!(std::fs::read_to_string(&collection).unwrap(), before);
    }
}
