//! Scoped editing contexts.
//!
//! An [`EditSession`] holds the host mutably for as long as a context is open,
//! so a second context cannot be opened until the first is released. The
//! context is closed on drop, which covers early returns and `?` paths.

use std::ops::{Deref, DerefMut};

use crate::error::{HostError, HostResult};
use crate::scene::{EditMode, HostScene, ObjectId};

/// An open editing context on one target.
pub struct EditSession<'a, H: HostScene + ?Sized> {
    host: &'a mut H,
    target: ObjectId,
    mode: EditMode,
    open: bool,
}

impl<'a, H: HostScene + ?Sized> EditSession<'a, H> {
    /// Opens `mode` on `target`.
    pub fn begin(host: &'a mut H, target: ObjectId, mode: EditMode) -> HostResult<Self> {
        host.enter_mode(target, mode)?;
        log::debug!("entered {:?} on {}", mode, target);
        Ok(Self {
            host,
            target,
            mode,
            open: true,
        })
    }

    /// Closes the context and reports any host error.
    pub fn finish(mut self) -> HostResult<()> {
        self.open = false;
        self.host.exit_mode()?;
        log::debug!("left {:?} on {}", self.mode, self.target);
        Ok(())
    }
}

impl<H: HostScene + ?Sized> Deref for EditSession<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: HostScene + ?Sized> DerefMut for EditSession<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: HostScene + ?Sized> Drop for EditSession<'_, H> {
    fn drop(&mut self) {
        if self.open {
            if let Err(e) = self.host.exit_mode() {
                log::warn!(
                    "failed to leave {:?} on {} while unwinding: {}",
                    self.mode,
                    self.target,
                    e
                );
            }
        }
    }
}

/// Runs `f` inside `mode` on `target`, releasing the context on every path.
///
/// If `f` fails, the context is still closed and `f`'s error is returned.
pub fn with_mode<H, T, E, F>(host: &mut H, target: ObjectId, mode: EditMode, f: F) -> Result<T, E>
where
    H: HostScene + ?Sized,
    E: From<HostError>,
    F: FnOnce(&mut H) -> Result<T, E>,
{
    let mut session = EditSession::begin(host, target, mode)?;
    let value = f(&mut *session)?;
    session.finish()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryScene, MeshData};
    use crate::scene::Transform;

    fn scene_with_armature() -> (MemoryScene, ObjectId) {
        let mut scene = MemoryScene::new();
        let arm = scene.create_armature("Arm", Transform::IDENTITY).unwrap();
        (scene, arm)
    }

    #[test]
    fn test_session_closes_on_drop() {
        let (mut scene, arm) = scene_with_armature();
        {
            let session = EditSession::begin(&mut scene, arm, EditMode::Edit).unwrap();
            assert_eq!(session.active_context(), Some((arm, EditMode::Edit)));
        }
        assert_eq!(scene.active_context(), None);
    }

    #[test]
    fn test_with_mode_releases_on_error() {
        let (mut scene, arm) = scene_with_armature();
        let result: HostResult<()> = with_mode(&mut scene, arm, EditMode::Edit, |host| {
            host.remove_bone(arm, "missing")
        });
        assert!(matches!(result, Err(HostError::BoneNotFound { .. })));
        assert_eq!(scene.active_context(), None);
    }

    #[test]
    fn test_second_context_rejected_by_host() {
        let (mut scene, arm) = scene_with_armature();
        let mesh = scene
            .add_mesh("Box", MeshData::cuboid([1.0, 1.0, 1.0]), Transform::IDENTITY)
            .unwrap();
        let mut session = EditSession::begin(&mut scene, arm, EditMode::Pose).unwrap();
        let err = session.enter_mode(mesh, EditMode::Edit).unwrap_err();
        assert!(matches!(err, HostError::ContextAlreadyOpen { .. }));
        session.finish().unwrap();
        assert_eq!(scene.active_context(), None);
    }
}
