// ============================================================================
// USER SELECT - Opciones de selects de usuario
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{option, ElementBuilder};
use crate::models::Profile;

pub const ME_PREFIX: &str = "★ Eu - ";

/// "{★ Eu - }{nome} ({cargo})"
pub fn assignee_label(user: &Profile, me: Option<&str>) -> String {
    let prefix = if me == Some(user.id.as_str()) { ME_PREFIX } else { "" };
    format!("{}{} ({})", prefix, user.display_name(), user.cargo_label())
}

/// `<select>` con placeholder vacío y una opción por usuario
pub fn render_user_select(
    id: &str,
    users: &[Profile],
    selected: Option<&str>,
    placeholder: &str,
    label: impl Fn(&Profile) -> String,
) -> Result<Element, JsValue> {
    let select = ElementBuilder::new("select")?.id(id)?.class("form-control").build();
    let opt = option("", placeholder, selected.is_none())?;
    select.append_child(&opt)?;
    for user in users {
        let is_selected = selected == Some(user.id.as_str());
        let opt = option(&user.id, &label(user), is_selected)?;
        select.append_child(&opt)?;
    }
    Ok(select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cargo;
    use crate::viewmodels::aggregation::fixtures::profile;

    #[test]
    fn test_assignee_label_marks_current_user() {
        let ana = profile("a1", "Ana", Cargo::Gerente);
        assert_eq!(assignee_label(&ana, Some("a1")), "★ Eu - Ana (Gerente)");
        assert_eq!(assignee_label(&ana, Some("b2")), "Ana (Gerente)");
        assert_eq!(assignee_label(&ana, None), "Ana (Gerente)");
    }
}
