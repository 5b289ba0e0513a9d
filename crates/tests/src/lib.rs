//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 解析器 + 加载器 + 默认组件的端到端链路（无需真实媒体）

#[cfg(test)]
mod contract_tests {
    use contracts::{ComponentKind, ComponentName, PIPELINE_STAGES};

    #[test]
    fn test_stages_cover_required_components() {
        let names: Vec<_> = PIPELINE_STAGES.iter().map(|s| s.component).collect();
        for name in ComponentName::required() {
            assert!(
                names.iter().any(|n| *n == name.as_str()),
                "no stage for {name}"
            );
        }
        assert_eq!(PIPELINE_STAGES[0].kind, ComponentKind::ArgsParser);
        assert_eq!(PIPELINE_STAGES[3].operations, &["process"]);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use artifact_resolver::{ArtifactResolver, LibraryPath, NATIVE_SUFFIX};
    use component_loader::binary::NATIVE_MAGIC;
    use component_loader::{ComponentLoader, LoadError};
    use config_loader::ConfigLoader;
    use contracts::{ComponentKind, ComponentName, COMPONENT_ABI_VERSION};

    /// Working directory holding `libraries/`, a capture file and `cfg.json`
    struct Fixture {
        dir: tempfile::TempDir,
        library: LibraryPath,
        config: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let library_dir = dir.path().join("libraries");
            std::fs::create_dir(&library_dir).unwrap();
            for name in ComponentName::required() {
                std::fs::write(
                    library_dir.join(format!("{name}{NATIVE_SUFFIX}")),
                    NATIVE_MAGIC,
                )
                .unwrap();
            }

            let input = dir.path().join("capture.raw");
            std::fs::write(&input, b"").unwrap();
            let config = dir.path().join("cfg.json");
            let content = serde_json::json!({
                "programSettings": {
                    "input": input,
                    "output": "rtmp://localhost/live/stream",
                    "watermark": { "enabled": false }
                },
                "ffmpegSettings": { "logLevel": "info" }
            });
            std::fs::write(&config, content.to_string()).unwrap();

            let library = LibraryPath::resolve(dir.path(), "libraries").unwrap();
            Self {
                dir,
                library,
                config,
            }
        }

        fn loader(&self) -> ComponentLoader {
            ComponentLoader::new(components::builtin_registry())
        }

        fn argv(&self) -> Vec<String> {
            vec![
                "launcher".to_string(),
                "--config".to_string(),
                self.config.to_string_lossy().into_owned(),
            ]
        }
    }

    /// 默认组件完整链路：parse -> print -> setup -> process
    #[test]
    fn test_builtin_components_full_chain() {
        let fixture = Fixture::new();
        let mut loader = fixture.loader();

        let name = ComponentName::new(ComponentName::ARGS_PARSER);
        assert!(ArtifactResolver::verify_component(&fixture.library, &name));
        let bound = loader.load(&fixture.library, &name).unwrap();
        let mut parser = bound.construct_args_parser().unwrap();
        assert!(parser.parse(&fixture.argv()).unwrap());
        let config_file_name = parser.config_file_name().unwrap();

        let name = ComponentName::new(ComponentName::VERSION_PRINTER);
        assert!(ArtifactResolver::verify_component(&fixture.library, &name));
        let bound = loader.load(&fixture.library, &name).unwrap();
        bound
            .version_printer()
            .unwrap()
            .print_libraries_versions()
            .unwrap();

        let name = ComponentName::new(ComponentName::VIDEO_STREAMER);
        assert!(ArtifactResolver::verify_component(&fixture.library, &name));
        let bound = loader.load(&fixture.library, &name).unwrap();
        let mut streamer = bound.construct_video_streamer().unwrap();
        assert!(streamer.setup(&config_file_name).unwrap());
        assert!(streamer.process().unwrap());

        assert_eq!(loader.bound_names().len(), 3);
    }

    #[test]
    fn test_load_is_idempotent() {
        let fixture = Fixture::new();
        let mut loader = fixture.loader();
        let name = ComponentName::new(ComponentName::VIDEO_STREAMER);

        let first = loader.load(&fixture.library, &name).unwrap();
        let second = loader.load(&fixture.library, &name).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.kind(), ComponentKind::VideoStreamer);
        assert_eq!(
            first.artifact().as_path(),
            fixture
                .library
                .as_path()
                .join(format!("{}{NATIVE_SUFFIX}", ComponentName::VIDEO_STREAMER))
        );
    }

    #[test]
    fn test_wrong_entry_kind() {
        let fixture = Fixture::new();
        let mut loader = fixture.loader();
        let bound = loader
            .load(
                &fixture.library,
                &ComponentName::new(ComponentName::ARGS_PARSER),
            )
            .unwrap();

        let err = bound
            .version_printer()
            .err()
            .expect("expected EntryMissing error");
        assert!(matches!(
            err,
            LoadError::EntryMissing {
                expected: ComponentKind::VersionPrinter,
                found: ComponentKind::ArgsParser,
                ..
            }
        ));
    }

    #[test]
    fn test_help_declines() {
        let fixture = Fixture::new();
        let mut loader = fixture.loader();
        let bound = loader
            .load(
                &fixture.library,
                &ComponentName::new(ComponentName::ARGS_PARSER),
            )
            .unwrap();

        let mut parser = bound.construct_args_parser().unwrap();
        let argv = vec!["launcher".to_string(), "--help".to_string()];
        assert!(!parser.parse(&argv).unwrap());
        assert!(parser.config_file_name().is_none());
    }

    #[test]
    fn test_artifact_directory_fails_verification() {
        let fixture = Fixture::new();
        let name = "plugins";
        std::fs::create_dir(
            fixture
                .library
                .as_path()
                .join(format!("{name}{NATIVE_SUFFIX}")),
        )
        .unwrap();

        let library = fixture.library.to_string_lossy();
        assert!(!ArtifactResolver::verify(&library, name));
        assert!(!ArtifactResolver::verify(&library, ""));
        assert!(!ArtifactResolver::verify("", name));
    }

    #[test]
    fn test_unregistered_artifact_not_found() {
        let fixture = Fixture::new();
        let name = ComponentName::new("audio_mixer");
        std::fs::write(
            fixture
                .library
                .as_path()
                .join(format!("{name}{NATIVE_SUFFIX}")),
            NATIVE_MAGIC,
        )
        .unwrap();

        assert!(ArtifactResolver::verify_component(&fixture.library, &name));
        let mut loader = fixture.loader();
        let err = loader.load(&fixture.library, &name).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(!loader.is_bound(name.as_str()));
    }

    #[test]
    fn test_streamer_reads_toml_config() {
        let fixture = Fixture::new();
        let settings = ConfigLoader::load_from_path(&fixture.config).unwrap();
        let toml_path = fixture.dir.path().join("cfg.toml");
        std::fs::write(&toml_path, ConfigLoader::to_toml(&settings).unwrap()).unwrap();

        let mut loader = fixture.loader();
        let bound = loader
            .load(
                &fixture.library,
                &ComponentName::new(ComponentName::VIDEO_STREAMER),
            )
            .unwrap();
        let mut streamer = bound.construct_video_streamer().unwrap();
        assert!(streamer.setup(&toml_path.to_string_lossy()).unwrap());
        assert!(streamer.process().unwrap());
    }

    #[test]
    fn test_registry_abi_matches() {
        let registry = components::builtin_registry();
        for name in registry.names() {
            let registration = registry.get(name.as_str()).unwrap();
            assert_eq!(registration.abi_version, COMPONENT_ABI_VERSION);
        }
    }

    #[test]
    fn test_missing_library_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LibraryPath::resolve(dir.path(), "libraries").is_err());

        std::fs::write(dir.path().join("libraries"), b"").unwrap();
        assert!(LibraryPath::resolve(Path::new(dir.path()), "libraries").is_err());
    }
}
