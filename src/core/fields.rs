use serde::{Deserialize, Serialize};

/// Generates the fixed-shape field record from the static field-name list,
/// so the key set is closed at compile time: one optional-string member per
/// field, name-based access for the merge passes, and the exact display
/// names on the serialized form.
macro_rules! field_record {
    ($($ident:ident => $name:literal),+ $(,)?) => {
        /// The 43-field structured product-label representation. Every
        /// field is present on the serialized form; unset fields serialize
        /// as `null`.
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        pub struct FieldRecord {
            $(
                #[serde(rename = $name, default)]
                pub $ident: Option<String>,
            )+
        }

        impl FieldRecord {
            /// Display names of all fields, in declaration order.
            pub const FIELD_NAMES: &'static [&'static str] = &[$($name),+];

            /// Looks up a field value by its display name.
            pub fn get(&self, name: &str) -> Option<&str> {
                match name {
                    $($name => self.$ident.as_deref(),)+
                    _ => None,
                }
            }

            /// Sets a field by its display name. Returns false when the
            /// name matches no field.
            pub fn set(&mut self, name: &str, value: String) -> bool {
                match name {
                    $($name => {
                        self.$ident = Some(value);
                        true
                    })+
                    _ => false,
                }
            }
        }
    };
}

field_record! {
    title => "Title",
    description => "Description",
    brand => "Brand",
    bullet_point_heading_1 => "Bullet Point Heading 1",
    bullet_point_short_text_1 => "Bullet Point Short Text 1",
    bullet_point_long_text_a_1 => "Bullet Point Long Text A 1",
    bullet_point_long_text_b_1 => "Bullet Point Long Text B 1",
    bullet_point_long_text_c_1 => "Bullet Point Long Text C 1",
    bullet_point_heading_2 => "Bullet Point Heading 2",
    bullet_point_short_text_2 => "Bullet Point Short Text 2",
    bullet_point_long_text_a_2 => "Bullet Point Long Text A 2",
    bullet_point_long_text_b_2 => "Bullet Point Long Text B 2",
    bullet_point_long_text_c_2 => "Bullet Point Long Text C 2",
    icon_1 => "Icon - 1",
    icon_2 => "Icon - 2",
    icon_3 => "Icon - 3",
    icon_4 => "Icon - 4",
    weight => "Weight",
    height => "Height",
    width => "Width",
    size_volume => "Size/Volume",
    included_count => "Included Count",
    content_type_sub_packages => "Content Type/Sub-packages",
    ingredients => "Ingredients",
    instructions => "Instructions",
    manufacturing_details => "Manufacturing Details",
    country_of_origin => "Country of Origin (COO)",
    product_nature => "Product Nature",
    package_type => "Package Type",
    category_1 => "Category - 1",
    sub_category_1 => "Sub-category 1",
    category_2 => "Category - 2",
    sub_category_2 => "Sub-category 2",
    nutritional_facts => "Nutritional Facts",
    barcode => "Barcode",
    gsi_ean => "GSI EAN",
    color => "Color",
    industry => "Industry",
    warnings => "Warnings",
    lifestyle_prompt => "Lifestyle Prompt",
    unspsc => "UNSPSC",
    date_of_manufacturing => "Date of Manufacturing",
    expiry_date => "Expiry Date",
}
