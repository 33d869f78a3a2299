use anyhow::{Result, bail};
use std::path::Path;

/// 確認路徑存在且為資料夾，否則回傳可直接顯示給使用者的錯誤
pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_existing_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(validate_directory_exists(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_validate_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let err = validate_directory_exists(&file).unwrap_err();
        assert!(err.to_string().contains("不是資料夾"));
    }

    #[test]
    fn test_validate_missing_path_is_rejected() {
        let err = validate_directory_exists(Path::new("/nonexistent/for/sure")).unwrap_err();
        assert!(err.to_string().contains("不存在"));
    }
}
