//! Command handlers: each prints its result to standard output.
use tessera_core::context_menu::{ContextTarget, ContextType};
use tessera_core::kernel::constants::{APP_NAME, APP_VERSION};
use tessera_core::settings::SettingValue;
use tessera_core::view::ViewLocation;
use tessera_core::{Error, ExtensionHost, Result};

pub fn summary(host: &ExtensionHost) -> Result<()> {
    println!("{} {}", APP_NAME, APP_VERSION);
    println!("Locale: {}", host.i18n().locale());
    println!("Extensions:");
    for (name, version) in host.installed_extensions()? {
        println!("  - {} {}", name, version);
    }
    println!(
        "{} views, {} settings, {} context-menu providers",
        host.views().len(),
        host.settings().descriptors()?.len(),
        host.context_menu().len()
    );
    Ok(())
}

pub fn list_views(host: &ExtensionHost, location: ViewLocation) -> Result<()> {
    let views = host.views().views_at(location)?;
    if views.is_empty() {
        println!("No views at {}", location);
    }
    for view in views {
        println!("{}\t{} (order {})", view.id, view.title, view.order);
    }
    Ok(())
}

pub async fn open_view(host: &ExtensionHost, location: ViewLocation, id: &str) -> Result<()> {
    let view = host.open_view(location, id).await?;
    for line in view.render() {
        println!("{}", line);
    }
    Ok(())
}

pub fn list_commands(host: &ExtensionHost, query: Option<&str>) -> Result<()> {
    let commands = match query {
        Some(query) => host.views().search_commands(query)?,
        None => host.views().commands()?,
    };
    for command in commands {
        println!("{}\t[{}/{}]", command.command_prompt, command.location, command.id);
    }
    Ok(())
}

pub fn list_settings(host: &ExtensionHost, search: Option<&str>) -> Result<()> {
    let settings = host.settings();
    let descriptors = match search {
        Some(query) => settings.search(query)?,
        None => settings.descriptors()?,
    };
    for descriptor in descriptors {
        let value = settings.get(&descriptor.setting_name)?;
        let label = descriptor
            .option_title(&value)
            .map(|title| format!(" ({})", title))
            .unwrap_or_default();
        println!(
            "[{}] {} = {}{}\t{}",
            descriptor.category, descriptor.setting_name, value, label, descriptor.title
        );
    }
    Ok(())
}

pub fn get_setting(host: &ExtensionHost, name: &str) -> Result<()> {
    println!("{}", host.settings().get(name)?);
    Ok(())
}

pub fn set_setting(host: &ExtensionHost, name: &str, raw: String) -> Result<()> {
    let settings = host.settings();
    let descriptor = settings.descriptor(name)?;
    // Unparsable input is passed through so the registry reports the mismatch
    let value = SettingValue::parse(descriptor.setting_type, &raw).unwrap_or(SettingValue::Text(raw));
    settings.set(name, value)?;
    println!("{} = {}", name, settings.get(name)?);
    Ok(())
}

pub fn reset_setting(host: &ExtensionHost, name: &str) -> Result<()> {
    host.settings().reset(name)?;
    println!("{} = {}", name, host.settings().get(name)?);
    Ok(())
}

fn context_target(kind: &str, url: String) -> Result<ContextTarget> {
    let target = match kind.parse::<ContextType>().map_err(Error::Other)? {
        ContextType::UiSourceCode => ContextTarget::UiSourceCode { url },
        ContextType::Resource => ContextTarget::Resource {
            url,
            mime_type: "text/plain".to_string(),
        },
        ContextType::NetworkRequest => ContextTarget::NetworkRequest {
            url,
            method: "GET".to_string(),
        },
    };
    Ok(target)
}

pub async fn show_menu(host: &ExtensionHost, kind: &str, url: String) -> Result<()> {
    let target = context_target(kind, url)?;
    let menu = host.context_menu_for(&target).await?;
    if menu.is_empty() {
        println!("No menu items");
    }
    for item in menu.items() {
        println!("{}\t({})", item.label, item.action_id);
    }
    Ok(())
}
