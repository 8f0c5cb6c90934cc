use metacat_types::{EntityStatus, Guid};
use std::any::Any;

use crate::kinds::{
    Collection, Column, Connection, Database, Folder, Glossary, GlossaryTerm, Schema, Table, View,
};
use crate::{Asset, AssetKind, Entity, ModelResult};

macro_rules! any_asset {
    ($($variant:ident),+ $(,)?) => {
        /// An asset of any known kind, dispatched on the entity's type name.
        ///
        /// Entities of types this crate does not model are kept as
        /// [`AnyAsset::Unknown`] rather than rejected.
        #[derive(Debug, Clone, PartialEq)]
        pub enum AnyAsset {
            $($variant($variant),)+
            Unknown(Entity),
        }

        impl AnyAsset {
            pub fn from_entity(entity: Entity) -> ModelResult<Self> {
                $(
                    if entity.type_name == <$variant>::TYPE {
                        return Ok(Self::$variant(<$variant>::from_entity(entity)?));
                    }
                )+
                Ok(Self::Unknown(entity))
            }

            pub fn to_entity(&self) -> ModelResult<Entity> {
                match self {
                    $(Self::$variant(asset) => asset.to_entity(),)+
                    Self::Unknown(entity) => Ok(entity.clone()),
                }
            }

            pub fn type_name(&self) -> &str {
                match self {
                    $(Self::$variant(asset) => asset.type_name(),)+
                    Self::Unknown(entity) => &entity.type_name,
                }
            }

            pub fn guid(&self) -> Option<&Guid> {
                match self {
                    $(Self::$variant(asset) => asset.guid.as_ref(),)+
                    Self::Unknown(entity) => entity.guid.as_ref(),
                }
            }

            pub fn qualified_name(&self) -> Option<&str> {
                match self {
                    $(Self::$variant(asset) => asset.qualified_name(),)+
                    Self::Unknown(entity) => entity.qualified_name(),
                }
            }

            pub fn name(&self) -> Option<&str> {
                match self {
                    $(Self::$variant(asset) => asset.name(),)+
                    Self::Unknown(entity) => entity.name(),
                }
            }

            pub fn status(&self) -> Option<EntityStatus> {
                match self {
                    $(Self::$variant(asset) => asset.status,)+
                    Self::Unknown(entity) => entity.status,
                }
            }

            /// Borrows the asset as kind `A`, if that is what it holds.
            pub fn downcast<A: AssetKind>(&self) -> Option<&Asset<A>> {
                match self {
                    $(Self::$variant(asset) => (asset as &dyn Any).downcast_ref::<Asset<A>>(),)+
                    Self::Unknown(_) => None,
                }
            }
        }

        $(
            impl From<$variant> for AnyAsset {
                fn from(asset: $variant) -> Self {
                    Self::$variant(asset)
                }
            }
        )+
    };
}

any_asset!(
    Connection,
    Database,
    Schema,
    Table,
    View,
    Column,
    Glossary,
    GlossaryTerm,
    Collection,
    Folder,
);

impl<A: AssetKind> Asset<A> {
    /// Type name shared by every asset of this kind.
    pub const TYPE: &'static str = A::TYPE_NAME;
}

impl AnyAsset {
    /// Converts into a specific kind, failing on a type mismatch.
    ///
    /// Goes through the wire shape, so APPEND/REMOVE references come back
    /// as plain REPLACE references (or not at all).
    pub fn into_kind<A: AssetKind>(self) -> ModelResult<Asset<A>> {
        Asset::<A>::from_entity(self.to_entity()?)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}
