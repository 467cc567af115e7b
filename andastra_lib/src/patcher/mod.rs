//---------------------------------------------------------------------------//
// Copyright (c) 2024-2026 The Andastra project contributors. All rights reserved.
//
// This file is part of the Andastra project,
// which can be found here: https://github.com/andastra-project/andastra.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/andastra-project/andastra/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! The patch engine: applies a declarative change set to an installation.
//!
//! A change set is a list of per-file patches. Each patch locates his file
//! through the installation resolver (or the patch folder, for new files),
//! applies his operations in declaration order, and writes the result to his
//! destination, usually `override/`. Two memory tables are shared by every
//! operation of one run: `2DAMEMORY` slots (strings) and `StrRef` slots
//! (talk-table references); operations may capture into them and later
//! operations may reference them through `#2DAMEMORY<n>#` / `#StrRef<n>#`
//! tokens. Files process strictly in sequence because those tables are
//! order-dependent.
//!
//! Failure semantics, per file:
//! * unresolvable memory token, parse failure on a prerequisite file: the
//!   file is abandoned with an error, the run continues.
//! * script compile failure: a warning, and the token-substituted source is
//!   installed in place of the bytecode.
//! * destination write failure: an error, the run continues. Writes go
//!   through a temp file and a rename, so a failed write leaves the
//!   destination untouched.
//!
//! A run ends successfully iff his log holds no error. Cancellation is
//! cooperative: the token is checked between files and between operations.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{ALibError, Result};
use crate::files::{Archive, Decodeable, Encodeable, ResRef, ResourceType};
use crate::files::erf::Erf;
use crate::files::gff::Gff;
use crate::files::ssf::Ssf;
use crate::files::tlk::Tlk;
use crate::files::twoda::TwoDA;
use crate::installation::Installation;
use crate::utils::{atomic_write, find_file_case_insensitive};

pub mod config;
pub mod gff_ops;
pub mod log;
pub mod memory;
pub mod ssf_ops;
pub mod tlk_ops;
pub mod twoda_ops;
pub mod uninstall;

#[cfg(test)] mod patcher_test;

pub use self::config::IniDocument;
pub use self::log::{PatchLog, PatchLogLevel};
pub use self::memory::PatchMemory;

use self::gff_ops::GffOp;
use self::ssf_ops::SsfOp;
use self::tlk_ops::TlkOp;
use self::twoda_ops::TwoDAOp;

//---------------------------------------------------------------------------//
//                              Enum & Structs
//---------------------------------------------------------------------------//

/// Where a patched file lands.
#[derive(Clone, Debug, PartialEq)]
pub enum Destination {

    /// A loose file under `override/`.
    Override,

    /// Inside a module archive under `modules/`.
    Modules(String),
}

/// The typed operation list of one file patch.
#[derive(Clone, Debug, PartialEq)]
pub enum PatchAction {
    ModifyTlk(Vec<TlkOp>),
    ModifyTwoDA(Vec<TwoDAOp>),
    ModifyGff(Vec<GffOp>),
    ModifySsf(Vec<SsfOp>),
    CompileScript,
    InstallFile,
}

/// One file's worth of patching.
#[derive(Clone, Debug, PartialEq)]
pub struct FilePatch {

    /// Name of the file being patched (his destination name).
    pub file_name: String,

    /// Name of the source file inside the patch folder, when it differs.
    pub source_file: Option<String>,

    /// Where the result lands.
    pub destination: Destination,

    /// If an existing destination file may be overwritten.
    pub replace: bool,

    /// If an existing destination file skips the patch instead of feeding it.
    pub skip_if_not_replace: bool,

    /// The operations to run.
    pub action: PatchAction,
}

/// A parsed change set: the file patches of one run, in execution order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangeSet {
    patches: Vec<FilePatch>,
}

impl ChangeSet {

    /// This function returns the file patches of the set, in execution order.
    pub fn patches(&self) -> &[FilePatch] {
        &self.patches
    }
}

/// Cooperative cancellation flag, checked between files and operations.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {

    /// This function creates a new, not-yet-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// This function requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// This function returns if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// This function fails with [`ALibError::PatchCancelled`] once cancellation
    /// has been requested.
    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ALibError::PatchCancelled)
        } else {
            Ok(())
        }
    }
}

/// The contract an external script compiler fulfils.
///
/// The engine substitutes memory tokens into the source before handing it
/// over; the implementor turns it into bytecode or fails with
/// [`ALibError::CompileError`].
pub trait ScriptCompiler {

    /// This function compiles a script source into bytecode.
    fn compile(&self, file_name: &str, source: &str) -> Result<Vec<u8>>;
}

/// A compiler that isn't there: every compile fails, and the engine installs
/// the substituted source instead.
pub struct NoCompiler;

impl ScriptCompiler for NoCompiler {
    fn compile(&self, file_name: &str, _source: &str) -> Result<Vec<u8>> {
        Err(ALibError::CompileError(file_name.to_owned(), "no script compiler configured".to_owned()))
    }
}

/// A compiler invoked as an external process, `nwnnsscomp`-style:
/// `<exe> -c <source> -o <output>`.
pub struct ExternalCompiler {
    path: PathBuf,
}

impl ExternalCompiler {

    /// This function creates a compiler wrapper around the provided executable.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ScriptCompiler for ExternalCompiler {
    fn compile(&self, file_name: &str, source: &str) -> Result<Vec<u8>> {
        let workdir = tempfile::tempdir()
            .map_err(|error| ALibError::CompileError(file_name.to_owned(), error.to_string()))?;
        let source_path = workdir.path().join(file_name);
        let output_path = source_path.with_extension("ncs");
        fs::write(&source_path, source)?;

        let output = Command::new(&self.path)
            .arg("-c").arg(&source_path)
            .arg("-o").arg(&output_path)
            .output()
            .map_err(|error| ALibError::CompileError(file_name.to_owned(), error.to_string()))?;

        if !output.status.success() {
            let diagnostics = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ALibError::CompileError(file_name.to_owned(), diagnostics));
        }

        fs::read(&output_path)
            .map_err(|error| ALibError::CompileError(file_name.to_owned(), error.to_string()))
    }
}

/// The patch engine itself: an installation, a patch folder, and a compiler.
pub struct PatchEngine<'a> {
    installation: &'a Installation,
    patch_dir: PathBuf,
    compiler: &'a dyn ScriptCompiler,
}

//---------------------------------------------------------------------------//
//                       Implementation of PatchEngine
//---------------------------------------------------------------------------//

impl<'a> PatchEngine<'a> {

    /// This function creates a new engine over an installation.
    pub fn new(installation: &'a Installation, patch_dir: &Path, compiler: &'a dyn ScriptCompiler) -> Self {
        Self {
            installation,
            patch_dir: patch_dir.to_path_buf(),
            compiler,
        }
    }

    /// This function runs a change set, returning the run's log.
    ///
    /// The memory tables live exactly as long as this call.
    pub fn run(&self, change_set: &ChangeSet, cancel: &CancellationToken) -> PatchLog {
        let mut log = PatchLog::new();
        let mut memory = PatchMemory::new();

        for patch in change_set.patches() {
            if cancel.is_cancelled() {
                log.error("patch run cancelled");
                break;
            }

            match self.apply_file(patch, &mut memory, &mut log, cancel) {
                Ok(()) => {}
                Err(ALibError::PatchCancelled) => {
                    log.error("patch run cancelled");
                    break;
                }
                Err(error) => log.error(format!("{}: {error}", patch.file_name)),
            }
        }

        log
    }

    /// This function applies one file patch.
    fn apply_file(&self, patch: &FilePatch, memory: &mut PatchMemory, log: &mut PatchLog, cancel: &CancellationToken) -> Result<()> {
        log.verbose(format!("processing {}", patch.file_name));

        match &patch.action {
            PatchAction::ModifyTlk(ops) => self.apply_tlk(patch, ops, memory, log, cancel),
            PatchAction::ModifyTwoDA(ops) => self.apply_twoda(patch, ops, memory, log, cancel),
            PatchAction::ModifyGff(ops) => self.apply_gff(patch, ops, memory, log, cancel),
            PatchAction::ModifySsf(ops) => self.apply_ssf(patch, ops, memory, log, cancel),
            PatchAction::CompileScript => self.apply_script(patch, memory, log),
            PatchAction::InstallFile => self.apply_install(patch, log),
        }
    }

    //--------------------------------------------------------//
    // Source/destination plumbing.
    //--------------------------------------------------------//

    /// This function splits a file name into the resource identity archives use.
    fn identity(file_name: &str) -> Result<(ResRef, ResourceType)> {
        let path = Path::new(file_name);
        let stem = path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = path.extension()
            .map(|extension| extension.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok((ResRef::new(&stem)?, ResourceType::from_extension(&extension)))
    }

    /// This function loads the bytes a Modify-type patch starts from: the
    /// resolver first, the patch folder as fallback for files the mod ships.
    fn source_bytes(&self, patch: &FilePatch) -> Result<Vec<u8>> {
        let (resref, restype) = Self::identity(&patch.file_name)?;
        if let Ok(bytes) = self.installation.resource(&resref, restype) {
            return Ok(bytes);
        }

        let source_name = patch.source_file.as_deref().unwrap_or(&patch.file_name);
        match find_file_case_insensitive(&self.patch_dir, source_name) {
            Some(path) => fs::read(&path).map_err(From::from),
            None => Err(ALibError::UnknownResource(resref.to_string(), restype.to_string())),
        }
    }

    /// This function returns the loose destination path of a patch, and if a
    /// file already exists there.
    fn destination_state(&self, patch: &FilePatch) -> Result<(PathBuf, bool)> {
        match &patch.destination {
            Destination::Override => {
                let folder = self.installation.override_path();
                let existing = find_file_case_insensitive(&folder, &patch.file_name);
                let exists = existing.is_some();
                Ok((existing.unwrap_or_else(|| folder.join(&patch.file_name)), exists))
            }
            Destination::Modules(archive) => {
                let path = self.installation.module_paths().iter()
                    .find(|path| crate::utils::file_name_matches(path, archive))
                    .cloned()
                    .ok_or_else(|| ALibError::ModuleNotFound(archive.to_owned()))?;

                let (resref, restype) = Self::identity(&patch.file_name)?;
                let mut reader = std::io::BufReader::new(fs::File::open(&path)?);
                let erf = Erf::decode(&mut reader, &None)?;
                Ok((path, erf.entry(&resref, restype).is_some()))
            }
        }
    }

    /// This function decides if an existing destination stops the patch.
    fn should_skip(&self, patch: &FilePatch, exists: bool, log: &mut PatchLog) -> bool {
        if exists && !patch.replace && patch.skip_if_not_replace {
            log.note(format!("{} already exists and Replace is not set, skipping", patch.file_name));
            true
        } else {
            false
        }
    }

    /// This function writes patched bytes to their destination.
    fn write_destination(&self, patch: &FilePatch, bytes: &[u8], log: &mut PatchLog) -> Result<()> {
        match &patch.destination {
            Destination::Override => {
                let (path, _) = self.destination_state(patch)?;
                atomic_write(&path, bytes)?;
                log.note(format!("installed {} into override", patch.file_name));
            }
            Destination::Modules(archive) => {
                let (path, _) = self.destination_state(patch)?;
                let (resref, restype) = Self::identity(&patch.file_name)?;

                let mut reader = std::io::BufReader::new(fs::File::open(&path)?);
                let mut erf = Erf::decode(&mut reader, &None)?;
                erf.load_all(&mut reader)?;
                erf.insert(resref, restype, bytes.to_vec());

                let mut encoded = vec![];
                erf.encode(&mut encoded, &None)?;
                atomic_write(&path, &encoded)?;
                log.note(format!("installed {} into {archive}", patch.file_name));
            }
        }

        Ok(())
    }

    //--------------------------------------------------------//
    // Per-action appliers.
    //--------------------------------------------------------//

    fn apply_tlk(&self, patch: &FilePatch, ops: &[TlkOp], memory: &mut PatchMemory, log: &mut PatchLog, cancel: &CancellationToken) -> Result<()> {
        let path = self.installation.dialog_tlk()
            .map(|path| path.to_path_buf())
            .unwrap_or_else(|| self.installation.root().join("dialog.tlk"));

        let mut tlk = if path.is_file() {
            Tlk::decode(&mut Cursor::new(fs::read(&path)?), &None)?
        } else {
            Tlk::new(0)
        };

        for op in ops {
            cancel.check()?;
            op.apply(&mut tlk, memory, &patch.file_name)?;
        }

        let mut encoded = vec![];
        tlk.encode(&mut encoded, &None)?;
        atomic_write(&path, &encoded)?;
        log.note(format!("updated {} ({} entries)", patch.file_name, tlk.len()));

        Ok(())
    }

    fn apply_twoda(&self, patch: &FilePatch, ops: &[TwoDAOp], memory: &mut PatchMemory, log: &mut PatchLog, cancel: &CancellationToken) -> Result<()> {
        let (_, exists) = self.destination_state(patch)?;
        if self.should_skip(patch, exists, log) {
            return Ok(());
        }

        let mut table = TwoDA::decode(&mut Cursor::new(self.source_bytes(patch)?), &None)?;
        for op in ops {
            cancel.check()?;
            op.apply(&mut table, memory, &patch.file_name)?;
        }

        let mut encoded = vec![];
        table.encode(&mut encoded, &None)?;
        self.write_destination(patch, &encoded, log)
    }

    fn apply_gff(&self, patch: &FilePatch, ops: &[GffOp], memory: &mut PatchMemory, log: &mut PatchLog, cancel: &CancellationToken) -> Result<()> {
        let (_, exists) = self.destination_state(patch)?;
        if self.should_skip(patch, exists, log) {
            return Ok(());
        }

        let mut gff = Gff::decode(&mut Cursor::new(self.source_bytes(patch)?), &None)?;
        for op in ops {
            cancel.check()?;
            op.apply(&mut gff, memory, &patch.file_name)?;
        }

        let mut encoded = vec![];
        gff.encode(&mut encoded, &None)?;
        self.write_destination(patch, &encoded, log)
    }

    fn apply_ssf(&self, patch: &FilePatch, ops: &[SsfOp], memory: &mut PatchMemory, log: &mut PatchLog, cancel: &CancellationToken) -> Result<()> {
        let (_, exists) = self.destination_state(patch)?;
        if self.should_skip(patch, exists, log) {
            return Ok(());
        }

        let mut ssf = Ssf::decode(&mut Cursor::new(self.source_bytes(patch)?), &None)?;
        for op in ops {
            cancel.check()?;
            op.apply(&mut ssf, memory, &patch.file_name)?;
        }

        let mut encoded = vec![];
        ssf.encode(&mut encoded, &None)?;
        self.write_destination(patch, &encoded, log)
    }

    fn apply_script(&self, patch: &FilePatch, memory: &mut PatchMemory, log: &mut PatchLog) -> Result<()> {
        let source_name = patch.source_file.as_deref().unwrap_or(&patch.file_name);
        let source_path = find_file_case_insensitive(&self.patch_dir, source_name)
            .ok_or_else(|| ALibError::UnknownResource(source_name.to_owned(), "nss".to_owned()))?;

        let source = String::from_utf8_lossy(&fs::read(&source_path)?).to_string();
        let source = memory.substitute(&source, &patch.file_name)?;

        match self.compiler.compile(&patch.file_name, &source) {
            Ok(bytecode) => {
                let output_name = Path::new(&patch.file_name).with_extension("ncs");
                let output_patch = FilePatch {
                    file_name: output_name.to_string_lossy().to_string(),
                    ..patch.clone()
                };
                let (_, exists) = self.destination_state(&output_patch)?;
                if self.should_skip(&output_patch, exists, log) {
                    return Ok(());
                }
                self.write_destination(&output_patch, &bytecode, log)
            }

            // Compile failures don't abort: the substituted source is
            // installed so the user can compile it by hand.
            Err(error) => {
                log.warning(format!("{error}"));
                let (_, exists) = self.destination_state(patch)?;
                if self.should_skip(patch, exists, log) {
                    return Ok(());
                }
                self.write_destination(patch, source.as_bytes(), log)
            }
        }
    }

    fn apply_install(&self, patch: &FilePatch, log: &mut PatchLog) -> Result<()> {
        let (_, exists) = self.destination_state(patch)?;
        if self.should_skip(patch, exists, log) {
            return Ok(());
        }

        let source_name = patch.source_file.as_deref().unwrap_or(&patch.file_name);
        let source_path = find_file_case_insensitive(&self.patch_dir, source_name)
            .ok_or_else(|| ALibError::UnknownResource(source_name.to_owned(), String::new()))?;

        let bytes = fs::read(&source_path)?;
        self.write_destination(patch, &bytes, log)
    }
}
