use chrono::Utc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::almuerzo::{
    default_icono, AlmuerzoItem, CreateAlmuerzoRequest, ReorderEntry, UpdateAlmuerzoRequest,
};
use crate::store::JsonStore;

pub struct AlmuerzoService;

impl AlmuerzoService {
    /// Items shown in the public composer: only disponible, sorted by
    /// (orden, nombre).
    pub async fn list_active(store: &JsonStore) -> Vec<AlmuerzoItem> {
        let doc = store.read().await;
        let mut items: Vec<AlmuerzoItem> = doc
            .almuerzos
            .into_iter()
            .filter(|i| i.disponible)
            .collect();
        sort_items(&mut items);
        items
    }

    /// Every item, inactive ones included (admin view).
    pub async fn list_all(store: &JsonStore) -> Vec<AlmuerzoItem> {
        let doc = store.read().await;
        let mut items = doc.almuerzos;
        sort_items(&mut items);
        items
    }

    /// New items land at the end: orden = max(orden) + 1, 0 on an empty list.
    pub async fn create(
        store: &JsonStore,
        req: CreateAlmuerzoRequest,
    ) -> Result<AlmuerzoItem, ApiError> {
        let nombre = req.nombre.trim().to_string();
        if nombre.is_empty() {
            return Err(ApiError::Validation("El nombre es obligatorio".to_string()));
        }
        if req.precio < 0 {
            return Err(ApiError::Validation(
                "El precio no puede ser negativo".to_string(),
            ));
        }

        store
            .update(move |doc| {
                let orden = doc
                    .almuerzos
                    .iter()
                    .map(|i| i.orden)
                    .max()
                    .map(|m| m + 1)
                    .unwrap_or(0);
                let now = Utc::now();
                let item = AlmuerzoItem {
                    id: Uuid::new_v4(),
                    nombre,
                    descripcion: req.descripcion.unwrap_or_default(),
                    precio: req.precio,
                    icono: req.icono.unwrap_or_else(default_icono),
                    categoria: req.categoria.unwrap_or_default(),
                    disponible: true,
                    orden,
                    created_at: now,
                    updated_at: now,
                };
                doc.almuerzos.push(item.clone());
                Ok(item)
            })
            .await
    }

    /// Merge the provided fields into an existing item.
    pub async fn update(
        store: &JsonStore,
        id: Uuid,
        req: UpdateAlmuerzoRequest,
    ) -> Result<AlmuerzoItem, ApiError> {
        if let Some(nombre) = &req.nombre {
            if nombre.trim().is_empty() {
                return Err(ApiError::Validation("El nombre es obligatorio".to_string()));
            }
        }
        if matches!(req.precio, Some(p) if p < 0) {
            return Err(ApiError::Validation(
                "El precio no puede ser negativo".to_string(),
            ));
        }

        store
            .update(move |doc| {
                let item = doc
                    .almuerzos
                    .iter_mut()
                    .find(|i| i.id == id)
                    .ok_or_else(|| ApiError::NotFound("Ítem no encontrado".to_string()))?;

                if let Some(nombre) = req.nombre {
                    item.nombre = nombre.trim().to_string();
                }
                if let Some(descripcion) = req.descripcion {
                    item.descripcion = descripcion;
                }
                if let Some(precio) = req.precio {
                    item.precio = precio;
                }
                if let Some(icono) = req.icono {
                    item.icono = icono;
                }
                if let Some(categoria) = req.categoria {
                    item.categoria = categoria;
                }
                if let Some(disponible) = req.disponible {
                    item.disponible = disponible;
                }
                if let Some(orden) = req.orden {
                    item.orden = orden;
                }
                item.updated_at = Utc::now();
                Ok(item.clone())
            })
            .await
    }

    /// Soft delete: the item drops out of the public list but keeps its
    /// history and orden.
    pub async fn delete(store: &JsonStore, id: Uuid) -> Result<(), ApiError> {
        store
            .update(move |doc| {
                let item = doc
                    .almuerzos
                    .iter_mut()
                    .find(|i| i.id == id)
                    .ok_or_else(|| ApiError::NotFound("Ítem no encontrado".to_string()))?;
                item.disponible = false;
                item.updated_at = Utc::now();
                Ok(())
            })
            .await
    }

    /// Apply new orden values; unknown ids are ignored.
    pub async fn reorder(store: &JsonStore, entries: Vec<ReorderEntry>) -> Result<(), ApiError> {
        store
            .update(move |doc| {
                let now = Utc::now();
                for entry in entries {
                    if let Some(item) = doc.almuerzos.iter_mut().find(|i| i.id == entry.id) {
                        item.orden = entry.orden;
                        item.updated_at = now;
                    }
                }
                Ok(())
            })
            .await
    }
}

fn sort_items(items: &mut [AlmuerzoItem]) {
    items.sort_by(|a, b| a.orden.cmp(&b.orden).then_with(|| a.nombre.cmp(&b.nombre)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::almuerzo::Categoria;

    fn create_req(nombre: &str, precio: i64) -> CreateAlmuerzoRequest {
        CreateAlmuerzoRequest {
            nombre: nombre.to_string(),
            descripcion: None,
            precio,
            icono: None,
            categoria: None,
        }
    }

    fn store(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::new(dir.path().join("site.json"))
    }

    #[tokio::test]
    async fn create_assigns_increasing_orden_and_lists_active() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let primero = AlmuerzoService::create(&store, create_req("Frijoles", 5000))
            .await
            .unwrap();
        let segundo = AlmuerzoService::create(&store, create_req("Arroz", 4000))
            .await
            .unwrap();

        assert_eq!(primero.orden, 0);
        assert!(segundo.orden > primero.orden);
        assert!(segundo.disponible);

        let items = AlmuerzoService::list_active(&store).await;
        assert_eq!(items.len(), 2);
        // sorted by orden, not by name
        assert_eq!(items[0].nombre, "Frijoles");
        assert_eq!(items[1].nombre, "Arroz");
    }

    #[tokio::test]
    async fn create_validates_nombre_and_precio() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let sin_nombre = AlmuerzoService::create(&store, create_req("   ", 1000))
            .await
            .unwrap_err();
        assert!(matches!(sin_nombre, ApiError::Validation(_)));

        let negativo = AlmuerzoService::create(&store, create_req("Sopa", -1))
            .await
            .unwrap_err();
        assert!(matches!(negativo, ApiError::Validation(_)));

        assert!(AlmuerzoService::list_all(&store).await.is_empty());
    }

    #[tokio::test]
    async fn update_merges_partial_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let item = AlmuerzoService::create(&store, create_req("Arroz", 4000))
            .await
            .unwrap();

        let updated = AlmuerzoService::update(
            &store,
            item.id,
            UpdateAlmuerzoRequest {
                precio: Some(4500),
                categoria: Some(Categoria::Base),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.nombre, "Arroz");
        assert_eq!(updated.precio, 4500);
        assert_eq!(updated.categoria, Categoria::Base);

        let missing = AlmuerzoService::update(
            &store,
            Uuid::new_v4(),
            UpdateAlmuerzoRequest::default(),
        )
        .await
        .unwrap_err();
        assert!(matches!(missing, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_soft_and_keeps_the_item_in_list_all() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let item = AlmuerzoService::create(&store, create_req("Arroz", 4000))
            .await
            .unwrap();
        AlmuerzoService::delete(&store, item.id).await.unwrap();

        assert!(AlmuerzoService::list_active(&store).await.is_empty());
        let all = AlmuerzoService::list_all(&store).await;
        assert_eq!(all.len(), 1);
        assert!(!all[0].disponible);

        let missing = AlmuerzoService::delete(&store, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(missing, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn reorder_applies_new_positions_and_ignores_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let a = AlmuerzoService::create(&store, create_req("Arroz", 4000))
            .await
            .unwrap();
        let b = AlmuerzoService::create(&store, create_req("Frijoles", 5000))
            .await
            .unwrap();

        AlmuerzoService::reorder(
            &store,
            vec![
                ReorderEntry { id: a.id, orden: 5 },
                ReorderEntry { id: b.id, orden: 1 },
                ReorderEntry {
                    id: Uuid::new_v4(),
                    orden: 99,
                },
            ],
        )
        .await
        .unwrap();

        let items = AlmuerzoService::list_active(&store).await;
        assert_eq!(items[0].nombre, "Frijoles");
        assert_eq!(items[1].nombre, "Arroz");
    }

    #[tokio::test]
    async fn ties_in_orden_fall_back_to_nombre() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        let a = AlmuerzoService::create(&store, create_req("Zanahoria", 2000))
            .await
            .unwrap();
        let b = AlmuerzoService::create(&store, create_req("Aguacate", 3000))
            .await
            .unwrap();

        AlmuerzoService::reorder(
            &store,
            vec![
                ReorderEntry { id: a.id, orden: 0 },
                ReorderEntry { id: b.id, orden: 0 },
            ],
        )
        .await
        .unwrap();

        let items = AlmuerzoService::list_active(&store).await;
        assert_eq!(items[0].nombre, "Aguacate");
        assert_eq!(items[1].nombre, "Zanahoria");
    }
}
