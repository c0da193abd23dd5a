use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use nix::errno::Errno;
use nix::fcntl::{Flock, FlockArg};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};

/// name of the repository marker directory
pub const MARKER_DIR: &str = ".twig";

/// a twig repository
///
/// all persisted state (objects, HEAD, index) is reached through this handle.
pub struct Repo {
    root: PathBuf,
    path: PathBuf,
    config: Config,
}

impl Repo {
    /// initialize a new repository with its marker directory under `root`
    ///
    /// an existing repository is reported and left untouched.
    pub fn init(root: &Path) -> Result<Self> {
        let path = root.join(MARKER_DIR);
        let config_path = path.join("config.toml");
        if config_path.exists() {
            return Err(Error::AlreadyInitialized(path));
        }

        // create directory structure
        std::fs::create_dir_all(path.join("objects")).with_path(&path)?;
        std::fs::create_dir_all(path.join("tmp")).with_path(&path)?;

        // HEAD starts empty, left alone if a previous partial init wrote it
        let head_path = path.join("HEAD");
        match OpenOptions::new().write(true).create_new(true).open(&head_path) {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => return Err(Error::Io { path: head_path, source: e }),
        }

        let config = Config::default();
        let repo = Self {
            root: root.to_path_buf(),
            path,
            config,
        };

        if !repo.index_path().exists() {
            crate::index::clear(&repo)?;
        }

        repo.config.save(&config_path)?;
        info!(path = %repo.path.display(), "initialized repository");

        Ok(repo)
    }

    /// open the repository whose marker directory is directly under `root`
    pub fn open(root: &Path) -> Result<Self> {
        let path = root.join(MARKER_DIR);
        let config_path = path.join("config.toml");
        if !config_path.exists() {
            return Err(Error::NoRepo(root.to_path_buf()));
        }

        let config = Config::load(&config_path)?;

        Ok(Self {
            root: root.to_path_buf(),
            path,
            config,
        })
    }

    /// find the repository containing `start` by walking up its ancestors
    pub fn discover(start: &Path) -> Result<Self> {
        let start = start.canonicalize().with_path(start)?;
        for dir in start.ancestors() {
            if dir.join(MARKER_DIR).join("config.toml").is_file() {
                debug!(root = %dir.display(), "discovered repository");
                return Self::open(dir);
            }
        }
        Err(Error::NoRepo(start))
    }

    /// working directory root (parent of the marker directory)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// marker directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// repository configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// mutable access to configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// save configuration changes
    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.config_path())
    }

    /// path to config.toml
    pub fn config_path(&self) -> PathBuf {
        self.path.join("config.toml")
    }

    /// path to objects directory
    pub fn objects_path(&self) -> PathBuf {
        self.path.join("objects")
    }

    /// path to the HEAD pointer file
    pub fn head_path(&self) -> PathBuf {
        self.path.join("HEAD")
    }

    /// path to the staging index file
    pub fn index_path(&self) -> PathBuf {
        self.path.join("index")
    }

    /// path to tmp directory (for atomic writes)
    pub fn tmp_path(&self) -> PathBuf {
        self.path.join("tmp")
    }

    /// path to lock file
    pub fn lock_path(&self) -> PathBuf {
        self.path.join("lock")
    }

    /// acquire exclusive lock on repository
    /// returns a guard that releases the lock on drop
    pub fn lock(&self) -> Result<RepoLock> {
        self.try_lock()?.ok_or(Error::LockContention)
    }

    /// try to acquire exclusive lock, returning None if already locked
    pub fn try_lock(&self) -> Result<Option<RepoLock>> {
        let lock_path = self.lock_path();
        let file = File::create(&lock_path).with_path(&lock_path)?;

        match Flock::lock(file, FlockArg::LockExclusiveNonblock) {
            Ok(flock) => Ok(Some(RepoLock { flock })),
            Err((_, errno)) => flock_failure(lock_path, errno),
        }
    }
}

/// only EWOULDBLOCK means another holder; anything else is a real failure
fn flock_failure(lock_path: PathBuf, errno: Errno) -> Result<Option<RepoLock>> {
    match errno {
        Errno::EWOULDBLOCK => Ok(None),
        errno => Err(Error::Io {
            path: lock_path,
            source: errno.into(),
        }),
    }
}

/// guard that holds repository lock until dropped
pub struct RepoLock {
    #[allow(dead_code)]
    flock: Flock<File>,
}
// lock is released automatically when Flock is dropped
