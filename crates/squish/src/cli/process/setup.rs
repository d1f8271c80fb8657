//! Session setup: config overrides from flags and codec initialization.

use squish_core::{Config, Mode, Session};

use super::OutputArgs;

/// Flag values that override the loaded configuration.
#[derive(Debug, Default)]
pub struct Overrides<'a> {
    /// Target format identifier for the chosen mode
    pub format: Option<&'a str>,
    /// Conversion quality, 0-100
    pub quality: Option<u8>,
    /// Output options shared by both commands
    pub output: Option<&'a OutputArgs>,
}

/// Apply flag overrides to `config` and build a session in `mode`.
///
/// `config` is whatever `main` loaded, defaults included when the file was
/// unreadable.
pub async fn setup_session(
    mut config: Config,
    mode: Mode,
    overrides: Overrides<'_>,
) -> anyhow::Result<(Session, Config)> {

    if let Some(quality) = overrides.quality {
        config.convert.quality = quality;
    }
    if let Some(output) = overrides.output {
        if let Some(ref dir) = output.out_dir {
            config.output.dir = dir.clone();
        }
        if output.overwrite {
            config.output.overwrite = true;
        }
    }
    config.validate()?;

    let session = Session::new(&config).await;
    session.set_mode(mode);

    // An explicitly requested format must be usable; config defaults fall
    // back silently inside the session.
    if let Some(format) = overrides.format {
        if let Err(e) = session.set_format(format) {
            anyhow::bail!("{e}\n\n  Hint: available formats are {}", available_formats(&session));
        }
    }

    Ok((session, config))
}

/// Comma-separated list of selectable formats for the session's mode.
pub fn available_formats(session: &Session) -> String {
    match session.mode() {
        Mode::Convert => squish_core::ImageTarget::ALL
            .iter()
            .map(|t| t.id())
            .collect::<Vec<_>>()
            .join(", "),
        Mode::Compress => session
            .available_compress_formats()
            .iter()
            .map(|t| t.id())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn setup_uses_given_config() {
        let mut config = Config::default();
        config.convert.quality = 33;

        let (session, applied) = setup_session(config, Mode::Convert, Overrides::default())
            .await
            .unwrap();
        assert_eq!(session.controls().quality, 33);
        assert_eq!(applied.convert.quality, 33);
        assert_eq!(session.mode(), Mode::Convert);
    }

    #[tokio::test]
    async fn setup_applies_flag_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let output = OutputArgs {
            out_dir: Some(dir.path().to_path_buf()),
            overwrite: true,
            ..OutputArgs::default()
        };

        let (session, applied) = setup_session(
            Config::default(),
            Mode::Compress,
            Overrides {
                format: Some("gz"),
                quality: Some(10),
                output: Some(&output),
            },
        )
        .await
        .unwrap();

        assert_eq!(session.mode(), Mode::Compress);
        assert_eq!(session.controls().quality, 10);
        assert_eq!(session.download_dir(), dir.path());
        assert!(applied.output.overwrite);
    }

    #[tokio::test]
    async fn setup_rejects_format_from_other_mode() {
        let err = setup_session(
            Config::default(),
            Mode::Compress,
            Overrides {
                format: Some("png"),
                ..Overrides::default()
            },
        )
        .await
        .err()
        .unwrap();
        assert!(err.to_string().contains("Hint: available formats are"));
    }
}
