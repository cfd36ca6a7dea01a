//! Form and query-string decoding
//!
//! Fields arrive as strings and are parsed here, so a malformed value never
//! rejects the whole request. Blank values count as absent.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Deserialize;

use guiargo_core::domain::{
    ClientDraft, CompanyDraft, ContactFilter, ContactStatus, DateRange, EntityKind, EntityRef,
    FollowUpDraft, FollowUpFilter, FollowUpSeed, FollowUpStatus, NotificationFilter,
    NotificationKind, NotificationRequest, Role, UserDraft, UserFilter,
};
use guiargo_shared::utils::non_blank;

fn text(value: &Option<String>) -> Option<String> {
    non_blank(value.as_deref())
}

fn parse<T: FromStr>(value: &Option<String>) -> Option<T> {
    text(value).and_then(|v| v.parse().ok())
}

/// `1`/`on`/`true` and `0`/`false`; anything else is unset.
pub fn flag(value: &Option<String>) -> Option<bool> {
    match text(value).as_deref() {
        Some("1") | Some("on") | Some("true") => Some(true),
        Some("0") | Some("false") => Some(false),
        _ => None,
    }
}

fn range(from: &Option<String>, to: &Option<String>) -> DateRange {
    DateRange::new(parse::<NaiveDate>(from), parse::<NaiveDate>(to))
}

/// POST body for `/clientes` and `/empresas`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    #[serde(alias = "action")]
    pub accion: Option<String>,
    pub id: Option<String>,
    pub nombre: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub whatsapp: Option<String>,
    pub direccion: Option<String>,
    pub ciudad: Option<String>,
    pub rfc: Option<String>,
    pub estatus: Option<String>,
    pub notas: Option<String>,
}

impl ContactForm {
    pub fn action(&self) -> String {
        text(&self.accion).unwrap_or_default()
    }

    pub fn id(&self) -> Option<i32> {
        parse(&self.id)
    }

    fn status(&self) -> ContactStatus {
        text(&self.estatus)
            .and_then(|s| ContactStatus::from_str(&s))
            .unwrap_or_default()
    }

    pub fn client_draft(&self) -> ClientDraft {
        ClientDraft {
            name: text(&self.nombre).unwrap_or_default(),
            email: text(&self.correo).unwrap_or_default(),
            phone: text(&self.telefono).unwrap_or_default(),
            whatsapp: text(&self.whatsapp),
            address: text(&self.direccion).unwrap_or_default(),
            city: text(&self.ciudad).unwrap_or_default(),
            status: self.status(),
            notes: text(&self.notas).unwrap_or_default(),
        }
    }

    pub fn company_draft(&self) -> CompanyDraft {
        CompanyDraft {
            name: text(&self.nombre).unwrap_or_default(),
            email: text(&self.correo).unwrap_or_default(),
            phone: text(&self.telefono).unwrap_or_default(),
            whatsapp: text(&self.whatsapp),
            address: text(&self.direccion).unwrap_or_default(),
            city: text(&self.ciudad).unwrap_or_default(),
            rfc: text(&self.rfc).unwrap_or_default(),
            status: self.status(),
            notes: text(&self.notas).unwrap_or_default(),
        }
    }
}

/// GET filters for `/clientes` (`busqueda`) and `/empresas` (`search`)
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ContactQuery {
    #[serde(alias = "search")]
    pub busqueda: Option<String>,
    pub estatus: Option<String>,
    pub ciudad: Option<String>,
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
    pub editar: Option<String>,
}

impl ContactQuery {
    pub fn filter(&self) -> ContactFilter {
        ContactFilter {
            search: text(&self.busqueda),
            status: text(&self.estatus).and_then(|s| ContactStatus::from_str(&s)),
            city: text(&self.ciudad),
            registered: range(&self.fecha_desde, &self.fecha_hasta),
        }
    }

    pub fn editing(&self) -> Option<i32> {
        parse(&self.editar)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserForm {
    #[serde(alias = "action")]
    pub accion: Option<String>,
    pub id: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub rol: Option<String>,
    pub activo: Option<String>,
}

impl UserForm {
    pub fn action(&self) -> String {
        text(&self.accion).unwrap_or_default()
    }

    pub fn id(&self) -> Option<i32> {
        parse(&self.id)
    }

    /// Role defaults to `colaborador`, `activo` to true
    pub fn draft(&self) -> UserDraft {
        UserDraft {
            username: text(&self.username).unwrap_or_default(),
            email: text(&self.email).unwrap_or_default(),
            password: text(&self.password),
            role: text(&self.rol).and_then(|r| Role::from_str(&r)).unwrap_or_default(),
            active: flag(&self.activo).unwrap_or(true),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct UserQuery {
    pub busqueda: Option<String>,
    pub rol: Option<String>,
    pub activo: Option<String>,
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
    pub editar: Option<String>,
}

impl UserQuery {
    pub fn filter(&self) -> UserFilter {
        UserFilter {
            search: text(&self.busqueda),
            role: text(&self.rol).and_then(|r| Role::from_str(&r)),
            active: flag(&self.activo),
            registered: range(&self.fecha_desde, &self.fecha_hasta),
        }
    }

    pub fn editing(&self) -> Option<i32> {
        parse(&self.editar)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FollowUpForm {
    #[serde(alias = "action")]
    pub accion: Option<String>,
    pub id: Option<String>,
    pub tipo_entidad: Option<String>,
    pub id_entidad: Option<String>,
    pub id_usuario_asignado: Option<String>,
    pub fecha_programada: Option<String>,
    pub descripcion: Option<String>,
    pub estatus: Option<String>,
    pub fecha_cumplimiento: Option<String>,
}

impl FollowUpForm {
    pub fn action(&self) -> String {
        text(&self.accion).unwrap_or_default()
    }

    pub fn id(&self) -> Option<i32> {
        parse(&self.id)
    }

    /// `None` when the entity, assignee or date is missing
    pub fn draft(&self) -> Option<FollowUpDraft> {
        let kind = text(&self.tipo_entidad).and_then(|k| EntityKind::from_str(&k))?;
        let entity = EntityRef::new(kind, parse(&self.id_entidad)?);
        Some(FollowUpDraft {
            entity,
            assigned_user_id: parse(&self.id_usuario_asignado)?,
            scheduled_date: parse(&self.fecha_programada)?,
            description: text(&self.descripcion).unwrap_or_default(),
            status: text(&self.estatus)
                .and_then(|s| FollowUpStatus::from_str(&s))
                .unwrap_or_default(),
            completed_on: parse(&self.fecha_cumplimiento),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FollowUpQuery {
    pub busqueda: Option<String>,
    pub tipo_entidad: Option<String>,
    pub estatus: Option<String>,
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
    pub usuario_asignado: Option<String>,
    pub editar: Option<String>,
}

impl FollowUpQuery {
    pub fn filter(&self) -> FollowUpFilter {
        FollowUpFilter {
            search: text(&self.busqueda),
            entity_kind: text(&self.tipo_entidad).and_then(|k| EntityKind::from_str(&k)),
            status: text(&self.estatus).and_then(|s| FollowUpStatus::from_str(&s)),
            scheduled: range(&self.fecha_desde, &self.fecha_hasta),
            assigned_user_id: parse(&self.usuario_asignado),
        }
    }

    pub fn editing(&self) -> Option<i32> {
        parse(&self.editar)
    }
}

/// POST body for `/notificaciones`.
///
/// Decoded from raw pairs because `usuarios_destino` repeats.
#[derive(Debug, Default)]
pub struct NotificationForm {
    pub action: Option<String>,
    pub id: Option<String>,
    pub tipo: Option<String>,
    pub mensaje: Option<String>,
    pub fecha_limite: Option<String>,
    pub prioritaria: Option<String>,
    pub usuarios_destino: Vec<String>,
    pub crear_seguimiento: Option<String>,
    pub tipo_entidad: Option<String>,
    pub id_entidad: Option<String>,
    pub fecha_programada: Option<String>,
    pub descripcion_seguimiento: Option<String>,
}

impl NotificationForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "action" | "accion" => form.action = Some(value),
                "id" => form.id = Some(value),
                "tipo" => form.tipo = Some(value),
                "mensaje" => form.mensaje = Some(value),
                "fecha_limite" => form.fecha_limite = Some(value),
                "prioritaria" => form.prioritaria = Some(value),
                "usuarios_destino" | "usuarios_destino[]" => form.usuarios_destino.push(value),
                "crear_seguimiento" => form.crear_seguimiento = Some(value),
                "tipo_entidad" => form.tipo_entidad = Some(value),
                "id_entidad" => form.id_entidad = Some(value),
                "fecha_programada" => form.fecha_programada = Some(value),
                "descripcion_seguimiento" => form.descripcion_seguimiento = Some(value),
                _ => {}
            }
        }
        form
    }

    pub fn action(&self) -> String {
        text(&self.action).unwrap_or_default()
    }

    pub fn id(&self) -> Option<i32> {
        parse(&self.id)
    }

    /// A follow-up is seeded only when requested with a complete entity reference.
    pub fn request(&self) -> NotificationRequest {
        let mut recipients: Vec<i32> = self
            .usuarios_destino
            .iter()
            .filter_map(|v| v.trim().parse().ok())
            .collect();
        let mut seen = HashSet::new();
        recipients.retain(|id| seen.insert(*id));

        let follow_up = if flag(&self.crear_seguimiento) == Some(true) {
            let kind = text(&self.tipo_entidad).and_then(|k| EntityKind::from_str(&k));
            let id = parse::<i32>(&self.id_entidad);
            let date = parse::<NaiveDate>(&self.fecha_programada)
                .or_else(|| parse::<NaiveDate>(&self.fecha_limite));
            match (kind, id, date) {
                (Some(kind), Some(id), Some(date)) => Some(FollowUpSeed {
                    entity: EntityRef::new(kind, id),
                    scheduled_date: date,
                    description: text(&self.descripcion_seguimiento).unwrap_or_default(),
                }),
                _ => None,
            }
        } else {
            None
        };

        NotificationRequest {
            recipients,
            kind: text(&self.tipo)
                .and_then(|k| NotificationKind::from_str(&k))
                .unwrap_or_default(),
            message: text(&self.mensaje).unwrap_or_default(),
            due_date: parse(&self.fecha_limite),
            priority: flag(&self.prioritaria).unwrap_or(false),
            follow_up,
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationQuery {
    pub tipo: Option<String>,
    pub leida: Option<String>,
    pub prioritaria: Option<String>,
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
}

impl NotificationQuery {
    pub fn filter(&self) -> NotificationFilter {
        NotificationFilter {
            kind: text(&self.tipo).and_then(|k| NotificationKind::from_str(&k)),
            read: flag(&self.leida),
            priority: flag(&self.prioritaria),
            sent: range(&self.fecha_desde, &self.fecha_hasta),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_contact_defaults() {
        let form = ContactForm { accion: s("crear"), nombre: s("  Ruiz "), whatsapp: s(" "), ..Default::default() };
        let draft = form.client_draft();
        assert_eq!(draft.name, "Ruiz");
        assert_eq!(draft.status, ContactStatus::PorContactar);
        assert!(draft.whatsapp.is_none());
    }

    #[test]
    fn test_unknown_filter_values_are_ignored() {
        let q = ContactQuery { estatus: s("Inventado"), fecha_desde: s("2026-13-01"), ..Default::default() };
        let filter = q.filter();
        assert!(filter.status.is_none());
        assert!(filter.registered.from.is_none());
    }

    #[test]
    fn test_user_defaults() {
        let draft = UserForm { username: s("ana"), email: s("ana@guiargo.mx"), ..Default::default() }.draft();
        assert_eq!(draft.role, Role::Colaborador);
        assert!(draft.active);

        let draft = UserForm { activo: s("0"), rol: s("admin"), ..Default::default() }.draft();
        assert!(!draft.active);
        assert_eq!(draft.role, Role::Admin);
    }

    #[test]
    fn test_user_query_active_zero_filters_inactive() {
        let q = UserQuery { activo: s("0"), ..Default::default() };
        assert_eq!(q.filter().active, Some(false));
    }

    #[test]
    fn test_follow_up_requires_entity_user_and_date() {
        let mut form = FollowUpForm {
            tipo_entidad: s("empresa"),
            id_entidad: s("4"),
            id_usuario_asignado: s("2"),
            fecha_programada: s("2026-05-01"),
            ..Default::default()
        };
        let draft = form.draft().unwrap();
        assert_eq!(draft.entity, EntityRef::Company(4));
        assert_eq!(draft.status, FollowUpStatus::Pendiente);

        form.id_usuario_asignado = None;
        assert!(form.draft().is_none());
    }

    #[test]
    fn test_notification_pairs() {
        let pairs = vec![
            ("action".to_string(), "crear".to_string()),
            ("usuarios_destino[]".to_string(), "2".to_string()),
            ("usuarios_destino[]".to_string(), "5".to_string()),
            ("tipo".to_string(), "Alerta".to_string()),
            ("mensaje".to_string(), "Revisar".to_string()),
            ("crear_seguimiento".to_string(), "1".to_string()),
            ("tipo_entidad".to_string(), "cliente".to_string()),
            ("id_entidad".to_string(), "9".to_string()),
            ("fecha_programada".to_string(), "2026-06-10".to_string()),
        ];
        let form = NotificationForm::from_pairs(pairs);
        assert_eq!(form.action(), "crear");

        let request = form.request();
        assert_eq!(request.recipients, vec![2, 5]);
        assert_eq!(request.kind, NotificationKind::Alerta);
        assert_eq!(request.follow_up.map(|f| f.entity), Some(EntityRef::Client(9)));
    }

    #[test]
    fn test_repeated_recipients_collapse_in_order() {
        let form = NotificationForm::from_pairs(vec![
            ("usuarios_destino[]".to_string(), "2".to_string()),
            ("usuarios_destino[]".to_string(), "5".to_string()),
            ("usuarios_destino[]".to_string(), "2".to_string()),
            ("usuarios_destino[]".to_string(), "x".to_string()),
            ("usuarios_destino[]".to_string(), "5".to_string()),
        ]);
        assert_eq!(form.request().recipients, vec![2, 5]);
    }

    #[test]
    fn test_follow_up_not_seeded_without_checkbox() {
        let form = NotificationForm::from_pairs(vec![
            ("usuarios_destino".to_string(), "2".to_string()),
            ("tipo_entidad".to_string(), "cliente".to_string()),
            ("id_entidad".to_string(), "9".to_string()),
        ]);
        assert!(form.request().follow_up.is_none());
    }
}
