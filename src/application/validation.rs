use crate::domain::config::storage::StorageConfig;

/// Screens a file for admissibility before anything touches the network.
///
/// Rules apply in order and the first failing rule wins: size limit, MIME
/// allow-list, extension allow-list. Pure over its inputs and the static
/// configuration; `Err` carries the user-facing rejection reason.
pub fn validate_file(
    file_name: &str,
    byte_size: u64,
    mime_type: &str,
    config: &StorageConfig,
) -> Result<(), String> {
    if byte_size > config.max_file_size {
        return Err(format!(
            "File size must be less than {}",
            format_size(config.max_file_size)
        ));
    }

    if !config.allowed_mime_types.iter().any(|m| m == mime_type) {
        return Err(format!(
            "Please upload an audio file ({})",
            accepted_formats(&config.allowed_extensions)
        ));
    }

    let extension = file_extension(file_name);
    if !config
        .allowed_extensions
        .iter()
        .any(|e| e.eq_ignore_ascii_case(&extension))
    {
        return Err(format!(
            "File extension not supported. Please use: {}",
            config.allowed_extensions.join(", ")
        ));
    }

    Ok(())
}

/// Lower-cased suffix after the last `.`, dot included; empty when there is
/// no dot.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((_, ext)) => format!(".{}", ext.to_lowercase()),
        None => String::new(),
    }
}

/// Human-readable byte count with 1024-based units, e.g. "100 MB".
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    let exponent = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    // Two decimals with trailing zeros trimmed: 1.5 MB, not 1.50 MB.
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[exponent])
    } else {
        format!("{} {}", rounded, UNITS[exponent])
    }
}

fn accepted_formats(extensions: &[String]) -> String {
    extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}
