use crate::errors::{AppError, AppResult};
use crate::export::ensure_writable;
use crate::store::LogStore;
use crate::store::audit;
use crate::ui::messages::success;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the workbook to `dest_file`, or write it into a zip archive next to it.
    /// Returns the path of the final backup.
    pub fn backup(
        store: &LogStore,
        dest_file: &str,
        compress: bool,
        force: bool,
    ) -> AppResult<PathBuf> {
        let src = store.path();
        let dest = Path::new(dest_file);

        // 1️⃣ Check workbook exists
        if !src.exists() {
            return Err(AppError::file_access(src, "workbook not found"));
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // 3️⃣ Overwrite protection
        let final_target = if compress {
            dest.with_extension("zip")
        } else {
            dest.to_path_buf()
        };
        if same_file(src, &final_target) {
            return Err(AppError::Export(format!(
                "backup target {} is the workbook itself",
                final_target.display()
            )));
        }
        ensure_writable(&final_target, force)?;

        // 4️⃣ Copy or compress straight from the workbook (writes are renamed into place,
        // so the source is never partial)
        if compress {
            compress_backup(src, &final_target)?;
        } else {
            fs::copy(src, &final_target)?;
            success(format!("Backup created: {}", final_target.display()));
        }
        let final_path = final_target;

        // 5️⃣ Audit
        audit::record_or_warn(
            src,
            "backup",
            &final_path.to_string_lossy(),
            if compress {
                "Backup created and compressed"
            } else {
                "Backup created"
            },
        );

        Ok(final_path)
    }
}

/// True when both paths name the same file. `b` may not exist yet.
fn same_file(a: &Path, b: &Path) -> bool {
    let Ok(a) = a.canonicalize() else {
        return false;
    };
    let b = match (b.parent(), b.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            match parent.canonicalize() {
                Ok(p) => p.join(name),
                Err(_) => return false,
            }
        }
        _ => return false,
    };
    a == b
}

/// Write the workbook into a single-entry .zip archive
fn compress_backup(path: &Path, zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "machine_log.xlsx".to_string());

    let mut f = fs::File::open(path)?;
    zip.start_file(name, options)?;
    std::io::copy(&mut f, &mut zip)?;
    zip.finish()?;

    success(format!("Compressed: {}", zip_path.display()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::store::workbook::{SheetData, write_workbook};

    fn store_in(dir: &Path) -> StoreConfig {
        let cfg = StoreConfig {
            storage_path: dir.join("machine_log.xlsx"),
            table_name: "MachineLog".into(),
            lock_timeout_ms: 200,
        };
        write_workbook(&cfg.storage_path, &[SheetData::new("MachineLog")]).unwrap();
        cfg
    }

    #[test]
    fn zip_next_to_the_workbook_keeps_the_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = store_in(dir.path());
        let store = LogStore::new(&cfg);
        let before = fs::read(store.path()).unwrap();

        let out = dir.path().join("machine_log.zip");
        let written = BackupLogic::backup(&store, out.to_str().unwrap(), true, false).unwrap();

        assert_eq!(written, out);
        assert_eq!(fs::read(store.path()).unwrap(), before);
        let mut archive = zip::ZipArchive::new(fs::File::open(&out).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.by_index(0).unwrap().name(), "machine_log.xlsx");
    }

    #[test]
    fn workbook_cannot_be_its_own_backup() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = store_in(dir.path());
        let store = LogStore::new(&cfg);
        let before = fs::read(store.path()).unwrap();

        let target = store.path().to_string_lossy().to_string();
        let err = BackupLogic::backup(&store, &target, false, true).unwrap_err();

        assert!(matches!(err, AppError::Export(_)));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }
}
