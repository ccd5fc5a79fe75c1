//! Contact form, confirmation and listing pages.

use formdesk_core::{
  contact::{Contact, ContactForm, Gender, Interest},
  validate::FormState,
};

use super::{checked, entry, escape_text, field_error, input, layout, selected, textarea};

/// The create form, or the edit form when `state.data.id` is set.
pub fn form_page(state: &FormState<ContactForm>) -> String {
  let data = &state.data;
  let errors = &state.errors;

  let (title, action, back) = match data.id {
    Some(id) => (
      "Editar Contato",
      format!("/contato/{id}/edit"),
      r#"<p><a href="/contato/lista">Voltar para a lista</a></p>"#,
    ),
    None => ("Formulário de Contato", "/contato".to_owned(), ""),
  };

  let genders: String = Gender::ALL
    .into_iter()
    .map(|g| {
      format!(
        r#"                <option value="{}"{}>{}</option>
"#,
        g.as_str(),
        selected(data.gender == g.as_str()),
        g.label(),
      )
    })
    .collect();

  let interests: String = Interest::ALL
    .into_iter()
    .map(|i| {
      format!(
        r#"                <label><input type="checkbox" name="interesses" value="{}"{}> {}</label>
"#,
        i.as_str(),
        checked(data.has_interest(i)),
        i.label(),
      )
    })
    .collect();

  let body = format!(
    r#"    <form method="post" action="{action}" novalidate>
{nome}{email}{idade}        <div class="field">
            <label for="genero">Gênero</label>
            <select id="genero" name="genero">
{genders}            </select>
            {genero_error}
        </div>
        <div class="field choices">
            <span>Interesses</span>
{interests}            {interesses_error}
        </div>
{mensagem}        <div class="field choices">
            <label><input type="checkbox" name="aceite" value="on"{aceite}> Aceito os termos de uso</label>
            {aceite_error}
        </div>
        <button type="submit">Enviar</button>
    </form>
    {back}"#,
    nome = input(errors, "text", "nome", "Nome", &data.name),
    email = input(errors, "email", "email", "E-mail", &data.email),
    idade = input(errors, "number", "idade", "Idade", &data.age),
    genero_error = field_error(errors, "genero"),
    interesses_error = field_error(errors, "interesses"),
    mensagem = textarea(errors, "mensagem", "Mensagem", &data.message),
    aceite = checked(data.consent),
    aceite_error = field_error(errors, "aceite"),
  );

  layout(title, &body)
}

/// Confirmation shown after a contact is stored.
pub fn success_page(data: &ContactForm) -> String {
  let gender = data
    .gender
    .parse::<Gender>()
    .map(gender_label)
    .unwrap_or_default();

  let body = format!(
    r#"    <p>Obrigado! Recebemos sua mensagem.</p>
    <dl>
{nome}{email}{idade}{genero}{interesses}{mensagem}    </dl>
    <p><a href="/contato">Enviar outra mensagem</a> · <a href="/contato/lista">Ver contatos</a></p>"#,
    nome = entry("Nome", &data.name),
    email = entry("E-mail", &data.email),
    idade = entry("Idade", &data.age),
    genero = entry("Gênero", gender),
    interesses = entry("Interesses", &interest_labels(&data.interests)),
    mensagem = entry("Mensagem", &data.message),
  );

  layout("Enviado com sucesso", &body)
}

/// Every stored contact, newest first.
pub fn list_page(contacts: &[Contact]) -> String {
  if contacts.is_empty() {
    return layout(
      "Lista de Contatos",
      r#"    <p>Nenhum contato cadastrado. <a href="/contato">Cadastrar o primeiro</a>.</p>"#,
    );
  }

  let rows: String = contacts.iter().map(list_row).collect();
  let body = format!(
    r#"    <table>
        <thead>
            <tr><th>#</th><th>Nome</th><th>E-mail</th><th>Idade</th><th>Gênero</th><th>Interesses</th><th>Mensagem</th><th>Criado em</th><th></th></tr>
        </thead>
        <tbody>
{rows}        </tbody>
    </table>"#
  );

  layout("Lista de Contatos", &body)
}

fn list_row(contact: &Contact) -> String {
  let d = &contact.details;
  let id = contact.id;
  let interests: Vec<String> = d.interests.iter().map(|i| i.as_str().to_owned()).collect();

  format!(
    r#"            <tr>
                <td>{id}</td>
                <td>{nome}</td>
                <td>{email}</td>
                <td>{idade}</td>
                <td>{genero}</td>
                <td>{interesses}</td>
                <td>{mensagem}</td>
                <td>{criado_em}</td>
                <td>
                    <a href="/contato/{id}/edit">Editar</a>
                    <form method="post" action="/contato/{id}/delete"><button type="submit">Excluir</button></form>
                </td>
            </tr>
"#,
    nome = escape_text(&d.name),
    email = escape_text(&d.email),
    idade = d.age.map(|a| a.to_string()).unwrap_or_default(),
    genero = gender_label(d.gender),
    interesses = escape_text(&interest_labels(&interests)),
    mensagem = escape_text(&d.message),
    criado_em = contact.created_at.format("%d/%m/%Y %H:%M"),
  )
}

fn gender_label(g: Gender) -> &'static str {
  match g {
    Gender::Unspecified => "",
    other => other.label(),
  }
}

fn interest_labels(tags: &[String]) -> String {
  tags
    .iter()
    .map(|tag| match tag.parse::<Interest>() {
      Ok(i) => i.label().to_owned(),
      Err(_) => tag.clone(),
    })
    .collect::<Vec<_>>()
    .join(", ")
}
