use crate::models::args::FieldArgs;
use sfa_classifier::{FieldDescriptor, classify, is_fillable};

/// Prints the field type the page agent would assign to an input with these attributes.
pub fn classify_field(args: &FieldArgs) {
    let mut descriptor = FieldDescriptor::default()
        .with_name(&args.name)
        .with_id(&args.id)
        .with_placeholder(&args.placeholder);
    if let Some(input_type) = &args.input_type {
        descriptor = descriptor.with_type(input_type);
    }
    if !args.label.is_empty() {
        descriptor = descriptor.with_label(&args.label);
    }

    if is_fillable(descriptor.input_type.as_deref()) {
        println!("{}", classify(&descriptor));
    } else {
        println!("{} (not filled)", classify(&descriptor));
    }
}
