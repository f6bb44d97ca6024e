//! Symbol source backed by the `qrcode` crate
//!
//! Produces single QR and Micro QR symbols. Version selection walks the
//! candidate versions from smallest to largest and keeps the first one the
//! data fits into; error boosting then tries stronger levels at that version.

use qrcode::types::{Color, EcLevel, Version};
use qrcode::QrCode;

use super::{
    EncodeError, EncodeRequest, ErrorLevel, MicroMode, ModuleMatrix, Symbol, SymbolSource,
    SymbolVersion,
};

/// Encoder using the `qrcode` crate; structured append is not available
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeSource;

impl QrcodeSource {
    pub fn new() -> Self {
        Self
    }

    /// Versions to try for automatic selection, smallest first
    fn candidates(micro: MicroMode) -> Vec<SymbolVersion> {
        let micro_versions = (1..=4).map(SymbolVersion::Micro);
        let normal_versions = (1..=40).map(SymbolVersion::Normal);
        match micro {
            MicroMode::Never => normal_versions.collect(),
            MicroMode::Allow => micro_versions.chain(normal_versions).collect(),
            MicroMode::Always => micro_versions.collect(),
        }
    }

    fn try_encode(data: &[u8], version: SymbolVersion, level: ErrorLevel) -> Option<QrCode> {
        QrCode::with_version(data, to_qr_version(version), to_ec_level(level)).ok()
    }
}

impl SymbolSource for QrcodeSource {
    fn encode(&self, request: &EncodeRequest) -> Result<Symbol, EncodeError> {
        if let Some(encoding) = &request.encoding {
            if !encoding.eq_ignore_ascii_case("utf-8") && !encoding.eq_ignore_ascii_case("utf8") {
                return Err(EncodeError::unsupported(format!("encoding '{}'", encoding)));
            }
        }

        let data = request.data.as_bytes();
        // M1 only carries error detection, which the backend files under L
        let level = request.error.unwrap_or(ErrorLevel::L);

        let (version, code) = match request.version {
            Some(version) => {
                if version.is_micro() && request.micro == MicroMode::Never {
                    return Err(EncodeError::rejected(format!(
                        "Micro QR version {} requested but Micro QR codes are not allowed",
                        version
                    )));
                }
                let code = QrCode::with_version(data, to_qr_version(version), to_ec_level(level))
                    .map_err(|e| {
                        EncodeError::rejected(format!(
                            "cannot encode data as version {}-{}: {}",
                            version, level, e
                        ))
                    })?;
                (version, code)
            }
            None => Self::candidates(request.micro)
                .into_iter()
                .find_map(|v| Self::try_encode(data, v, level).map(|code| (v, code)))
                .ok_or_else(|| {
                    EncodeError::rejected(format!(
                        "data does not fit any version at error level {}",
                        level
                    ))
                })?,
        };
        tracing::debug!(%version, %level, "selected symbol version");

        let (level, code) = if request.boost_error {
            ErrorLevel::DESCENDING
                .into_iter()
                .take_while(|candidate| *candidate > level)
                .find_map(|candidate| {
                    Self::try_encode(data, version, candidate).map(|code| (candidate, code))
                })
                .unwrap_or((level, code))
        } else {
            (level, code)
        };

        let side = code.width();
        let modules = code
            .to_colors()
            .into_iter()
            .map(|c| c == Color::Dark)
            .collect();
        let matrix = ModuleMatrix::from_square(side, modules)?;
        let error = match version {
            SymbolVersion::Micro(1) => None,
            _ => Some(level),
        };
        Ok(Symbol::new(matrix, version).with_error(error))
    }
}

fn to_qr_version(version: SymbolVersion) -> Version {
    match version {
        SymbolVersion::Micro(m) => Version::Micro(i16::from(m)),
        SymbolVersion::Normal(v) => Version::Normal(i16::from(v)),
    }
}

fn to_ec_level(level: ErrorLevel) -> EcLevel {
    match level {
        ErrorLevel::L => EcLevel::L,
        ErrorLevel::M => EcLevel::M,
        ErrorLevel::Q => EcLevel::Q,
        ErrorLevel::H => EcLevel::H,
    }
}
